use erdcanvas::SchemaViewer;
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <schema.json> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>   Output file (default: stdout)");
    eprintln!("  -c, --config <file>   Viewer config JSON");
    eprintln!("  -W, --width <px>      Canvas width (default: 1600)");
    eprintln!("  -H, --height <px>     Canvas height (default: 1200)");
    eprintln!();
    eprintln!("Set RUST_LOG=debug for layout diagnostics.");
    process::exit(1);
}

fn parse_px(flag: &str, value: &str) -> f64 {
    match value.parse::<f64>() {
        Ok(v) if v > 0.0 => v,
        _ => {
            eprintln!("Invalid value for {}: {}", flag, value);
            process::exit(1);
        }
    }
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path, e);
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut width = 1600.0;
    let mut height = 1200.0;

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);
        match (flag, value) {
            ("-o" | "--output", Some(v)) => output_path = Some(v.clone()),
            ("-c" | "--config", Some(v)) => config_path = Some(v.clone()),
            ("-W" | "--width", Some(v)) => width = parse_px(flag, v),
            ("-H" | "--height", Some(v)) => height = parse_px(flag, v),
            ("-h" | "--help", _) => usage(&args[0]),
            _ => {
                eprintln!("Unknown or incomplete option: {}", flag);
                process::exit(1);
            }
        }
        i += 2;
    }

    let schema = read_file(input_path);
    let config = config_path.as_deref().map(read_file);

    let viewer = match SchemaViewer::from_json(&schema, config.as_deref()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let svg = viewer.render_svg(width, height);

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &svg) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", svg),
    }
}
