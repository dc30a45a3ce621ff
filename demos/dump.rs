//! Small CLI demo exercising the library end to end.
//!
//! Usage:
//!   hive-dump <hive-path> --tree [key-path]
//!   hive-dump <hive-path> --value <key-path> <value-name>

use std::env;
use std::process::ExitCode;

use hive_parser::{Hive, RegistryKey};

fn print_tree(key: &RegistryKey, depth: usize) {
    let name = key.name().unwrap_or_else(|_| "<unreadable>".to_string());
    println!("{}{}", "  ".repeat(depth), if name.is_empty() { "\\" } else { &name });

    if let Ok(values) = key.values() {
        for value in &values {
            let rendered = value.data().map(|d| d.to_string()).unwrap_or_else(|e| format!("<error: {}>", e));
            println!("{}  {} = {} ({})", "  ".repeat(depth), value.name(), rendered, value.type_name());
        }
    }

    if let Ok(subkeys) = key.subkeys() {
        for subkey in &subkeys {
            print_tree(subkey, depth + 1);
        }
    }
}

fn run() -> hive_parser::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("usage:");
        eprintln!("  {} <hive-path> --tree [key-path]", args[0]);
        eprintln!("  {} <hive-path> --value <key-path> <value-name>", args[0]);
        std::process::exit(1);
    }

    let hive_path = &args[1];
    let hive = Hive::open(hive_path)?;
    let root = hive.root_key()?;

    match args[2].as_str() {
        "--tree" => {
            let target = match args.get(3) {
                Some(path) => root.find(path)?,
                None => root,
            };
            print_tree(&target, 0);
        }
        "--value" => {
            let key_path = args.get(3).expect("--value requires <key-path> <value-name>");
            let value_name = args.get(4).expect("--value requires <key-path> <value-name>");
            let key = root.find(key_path)?;
            let value = key.value(value_name)?;
            println!("{}", value.data()?.to_string());
        }
        other => {
            eprintln!("unrecognized mode: {}", other);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
