//! Cast CLI - Tool for inspecting and round-tripping Cast files.

use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use cast::prelude::*;
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter (e.g. `CAST_LOG=cast=trace`).
const LOG_ENV: &str = "CAST_LOG";

/// Values shown per property in `tree` before eliding the rest.
const PREVIEW_VALUES: usize = 4;

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = "info";
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "error",
            _ => filtered_args.push(arg),
        }
    }
    init_tracing(level);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    let result = match filtered_args[0] {
        // Info command - header and node counts
        "info" | "i" => with_file(&filtered_args, "info <file.cast>", cmd_info),

        // Tree command - show hierarchy
        "tree" | "t" => with_file(&filtered_args, "tree <file.cast>", cmd_tree),

        // Dump command - whole file as JSON
        "dump" | "d" => with_file(&filtered_args, "dump <file.cast>", cmd_dump),

        // Verify command - byte-exact round trip
        "verify" | "v" => with_file(&filtered_args, "verify <file.cast>", cmd_verify),

        // Copy command - decode and re-encode
        "copy" | "c" => {
            if filtered_args.len() < 3 {
                eprintln!("Error: missing arguments");
                eprintln!("Usage: cast-cli copy <input.cast> <output.cast>");
                std::process::exit(1);
            }
            cmd_copy(filtered_args[1], filtered_args[2])
        }

        // Help
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }

        // Default: if file exists, show info; otherwise error
        other => {
            if Path::new(other).exists() {
                cmd_info(other)
            } else {
                eprintln!("Unknown command: {}", other);
                eprintln!();
                print_help();
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn with_file(args: &[&str], usage: &str, cmd: fn(&str) -> Result<()>) -> Result<()> {
    match args.get(1) {
        Some(path) => cmd(path),
        None => {
            eprintln!("Error: missing file argument");
            eprintln!("Usage: cast-cli {}", usage);
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!("cast-cli - Cast file toolkit");
    println!();
    println!("USAGE:");
    println!("    cast-cli [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    i, info   <file>              Show header and node counts");
    println!("    t, tree   <file>              Show full node hierarchy with properties");
    println!("    d, dump   <file>              Dump the file as JSON");
    println!("    v, verify <file>              Check that re-encoding reproduces the file");
    println!("    c, copy   <in> <out>          Decode and re-encode to a new file");
    println!("    h, help                       Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Show debug output");
    println!("    -vv, --trace     Show trace output (very verbose)");
    println!("    -q, --quiet      Only show errors");
    println!();
    println!("ENVIRONMENT:");
    println!("    {}=<filter>  Log filter, overrides the options above", LOG_ENV);
    println!();
    println!("NOTES:");
    println!("    - Passing a .cast file directly is equivalent to 'info'");
}

fn cmd_info(path: &str) -> Result<()> {
    info!("Opening file: {}", path);
    let file = CastFile::open(path)?;

    println!("File:    {}", path);
    println!("Version: {}", file.version());
    println!("Flags:   {:#x}", file.flags());
    println!("Roots:   {}", file.roots().len());
    println!("Size:    {} bytes", file.size());
    println!();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for root in file.roots() {
        root.visit(&mut |node, _| *counts.entry(node.kind().to_string()).or_default() += 1);
    }
    println!("Nodes:");
    for (kind, count) in &counts {
        println!("  {:<18} {}", kind, count);
    }
    println!();
    println!("Total nodes: {}", file.num_nodes());
    Ok(())
}

fn cmd_tree(path: &str) -> Result<()> {
    info!("Opening file: {}", path);
    let file = CastFile::open(path)?;

    println!("File: {}", path);
    println!();
    for root in file.roots() {
        root.visit(&mut |node, depth| {
            let indent = "  ".repeat(depth);
            println!("{}{} [{:#018x}]", indent, node.kind(), node.hash());
            for property in node.properties() {
                println!("{}  .{} {}", indent, property.name(), preview(property));
            }
        });
    }
    Ok(())
}

fn cmd_dump(path: &str) -> Result<()> {
    debug!("Dumping file: {}", path);
    let file = CastFile::open(path)?;

    let doc = json!({
        "version": file.version(),
        "flags": file.flags(),
        "roots": file.roots().iter().map(node_json).collect::<Vec<_>>(),
    });
    match serde_json::to_string_pretty(&doc) {
        Ok(text) => println!("{}", text),
        Err(e) => return Err(Error::invalid(format!("JSON encoding failed: {}", e))),
    }
    Ok(())
}

fn cmd_verify(path: &str) -> Result<()> {
    info!("Verifying file: {}", path);
    let original = std::fs::read(path)?;
    let file = CastFile::from_bytes(&original)?;
    let encoded = file.to_bytes()?;

    let mismatches = file.size_mismatches();
    for (hash, stored, actual) in &mismatches {
        println!("  size mismatch: node {:#018x} stored {} recomputed {}", hash, stored, actual);
    }

    if encoded == original {
        println!("OK: {} bytes re-encoded identically ({} nodes)", encoded.len(), file.num_nodes());
        return Ok(());
    }

    let first_diff = encoded
        .iter()
        .zip(&original)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| encoded.len().min(original.len()));
    println!(
        "DIFF: original {} bytes, re-encoded {} bytes, first difference at offset {:#x}",
        original.len(),
        encoded.len(),
        first_diff
    );
    std::process::exit(2);
}

fn cmd_copy(input: &str, output: &str) -> Result<()> {
    info!("Copying {} -> {}", input, output);
    let file = CastFile::open(input)?;
    file.save(output)?;
    println!("Wrote {} ({} nodes, {} bytes)", output, file.num_nodes(), file.size());
    Ok(())
}

/// Short rendering of a property's values.
fn preview(property: &Property) -> String {
    fn list<T: std::fmt::Debug>(values: &[T]) -> String {
        let shown: Vec<String> = values.iter().take(PREVIEW_VALUES).map(|v| format!("{:?}", v)).collect();
        if values.len() > PREVIEW_VALUES {
            format!("[{}, ... {} total]", shown.join(", "), values.len())
        } else {
            format!("[{}]", shown.join(", "))
        }
    }

    let values = match property.values() {
        PropertyValues::Byte(v) => list(v),
        PropertyValues::Short(v) => list(v),
        PropertyValues::Integer32(v) => list(v),
        PropertyValues::Integer64(v) => list(&v.iter().map(|h| format!("{:#x}", h)).collect::<Vec<_>>()),
        PropertyValues::Float(v) => list(v),
        PropertyValues::Double(v) => list(v),
        PropertyValues::String(s) => format!("{:?}", String::from_utf8_lossy(s)),
        PropertyValues::Vector2(v) => list(v),
        PropertyValues::Vector3(v) => list(v),
        PropertyValues::Vector4(v) => list(v),
    };
    format!("({}) {}", property.kind(), values)
}

fn node_json(node: &Node) -> Value {
    let properties: serde_json::Map<String, Value> = node
        .properties()
        .map(|p| (p.name().to_string(), property_json(p)))
        .collect();
    json!({
        "kind": node.kind().to_string(),
        "hash": format!("{:#018x}", node.hash()),
        "properties": properties,
        "children": node.children().iter().map(node_json).collect::<Vec<_>>(),
    })
}

fn property_json(property: &Property) -> Value {
    let values = match property.values() {
        PropertyValues::Byte(v) => json!(v),
        PropertyValues::Short(v) => json!(v),
        PropertyValues::Integer32(v) => json!(v),
        PropertyValues::Integer64(v) => json!(v),
        PropertyValues::Float(v) => json!(v),
        PropertyValues::Double(v) => json!(v),
        PropertyValues::String(s) => json!(String::from_utf8_lossy(s)),
        PropertyValues::Vector2(v) => json!(v.iter().map(|x| x.to_array()).collect::<Vec<_>>()),
        PropertyValues::Vector3(v) => json!(v.iter().map(|x| x.to_array()).collect::<Vec<_>>()),
        PropertyValues::Vector4(v) => json!(v.iter().map(|x| x.to_array()).collect::<Vec<_>>()),
    };
    json!({ "type": property.kind().name(), "values": values })
}
