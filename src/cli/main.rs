use uefivars::driver::read_key_file;
use uefivars::efivarfs::DEFAULT_EFIVARFS_PATH;
use uefivars::{Format, OutputOptions, SecureBootKeys, Source, UVError};

use uefivars::reexports::log;

use clap::{Arg, ArgAction, ArgMatches, Command, crate_description, crate_name, crate_version};
use std::fs::File;
use std::io::{self, prelude::*};
use std::path::Path;

/// Helper function to create a file with parent directories
fn create_file_with_dirs(path: impl AsRef<Path>) -> Result<File, UVError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            UVError::InternalError(format!(
                "Failed to create parent directory for '{}': {}",
                path.display(),
                e
            ))
        })?;
    }
    File::create(path).map_err(|e| {
        UVError::InternalError(format!("Failed to create file '{}': {}", path.display(), e))
    })
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>, UVError> {
    let mut data = Vec::new();
    match path {
        Some(path) => {
            File::open(path)
                .map_err(|e| {
                    UVError::InternalError(format!("Failed to open file '{path}': {e}"))
                })?
                .read_to_end(&mut data)?;
        }
        None => {
            log::info!("Reading uefivars from stdin");
            io::stdin().lock().read_to_end(&mut data)?;
        }
    }
    Ok(data)
}

fn read_keys(matches: &ArgMatches) -> Result<SecureBootKeys, UVError> {
    let key = |arg: &str, name: &'static str| -> Result<Option<Vec<u8>>, UVError> {
        matches
            .get_one::<String>(arg)
            .map(|path| read_key_file(name, path))
            .transpose()
    };
    Ok(SecureBootKeys {
        pk: key("pk", "PK")?,
        kek: key("kek", "KEK")?,
        db: key("db", "db")?,
        dbx: key("dbx", "dbx")?,
    })
}

fn start() -> Result<(), UVError> {
    let matches = Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("format")
                .required(true)
                .help("Input type (\"aws\", \"json\", \"edk2\", \"efivarfs\", \"none\")"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("format[,options]")
                .required(true)
                .help("Output type (\"aws\", \"json\", \"edk2[,filesize=512]\")"),
        )
        .arg(
            Arg::new("inputfile")
                .short('I')
                .long("inputfile")
                .value_name("input_file")
                .help("Input file (stdin if not given), or the efivarfs directory"),
        )
        .arg(
            Arg::new("outputfile")
                .short('O')
                .long("outputfile")
                .value_name("output_file")
                .help("Output file (stdout if not given)"),
        )
        .arg(
            Arg::new("pk")
                .short('P')
                .long("PK")
                .value_name("file")
                .help("Insert PK from given file (usually PK.esl)"),
        )
        .arg(
            Arg::new("kek")
                .short('K')
                .long("KEK")
                .value_name("file")
                .help("Insert KEK from given file (usually KEK.esl)"),
        )
        .arg(
            Arg::new("db")
                .short('b')
                .long("db")
                .value_name("file")
                .help("Insert db from given file (usually db.esl)"),
        )
        .arg(
            Arg::new("dbx")
                .short('x')
                .long("dbx")
                .value_name("file")
                .help("Insert dbx from given file (usually dbx.esl)"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Prints debugging information"),
        )
        .get_matches();

    let debug = matches.get_flag("debug");

    env_logger::builder()
        .format_timestamp(None)
        .format_level(false)
        .format_module_path(false)
        .format_target(false)
        .filter_level(if debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let input: Format = matches
        .get_one::<String>("input")
        .ok_or(UVError::UsageError("Missing input type"))?
        .parse()?;
    let (output, options) = OutputOptions::split_spec(
        matches
            .get_one::<String>("output")
            .ok_or(UVError::UsageError("Missing output type"))?,
    );
    let output: Format = output.parse()?;
    let input_file = matches.get_one::<String>("inputfile").map(|s| s.as_str());
    let output_file = matches.get_one::<String>("outputfile").map(|s| s.as_str());

    let keys = read_keys(&matches)?;

    let data;
    let source = match input {
        Format::None => Source::Bytes(&[]),
        Format::Efivarfs => {
            Source::Directory(Path::new(input_file.unwrap_or(DEFAULT_EFIVARFS_PATH)))
        }
        _ => {
            data = read_input(input_file)?;
            Source::Bytes(&data)
        }
    };

    let out = uefivars::convert(input, source, output, &options, &keys)?;

    match output_file {
        Some(path) => create_file_with_dirs(path)?.write_all(&out)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&out)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() -> Result<(), UVError> {
    let res = start();
    match res {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
    Ok(())
}
