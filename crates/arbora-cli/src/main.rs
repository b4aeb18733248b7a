use arbora_core::{Entity, SceneOptions, TreeConfig, layout_scene};
use arbora_render::{SvgRenderOptions, render_scene_svg};
use chrono::NaiveDate;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Layout(arbora_core::Error),
    BadDate(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::BadDate(raw) => write!(f, "invalid date (expected YYYY-MM-DD): {raw}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<arbora_core::Error> for CliError {
    fn from(value: arbora_core::Error) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    pretty: bool,
    spines: bool,
    no_background: bool,
    config_path: Option<String>,
    elapsed: Option<f64>,
    window_start: Option<NaiveDate>,
    window_end: Option<NaiveDate>,
    today: Option<NaiveDate>,
}

fn usage() -> &'static str {
    "arbora-cli\n\
\n\
USAGE:\n\
  arbora-cli layout [--pretty] [--elapsed <0..1> | --window-start <date> --window-end <date> [--today <date>]] [--config <path>] [<path>|-]\n\
  arbora-cli render [--spines] [--no-background] [--elapsed <0..1> | --window-start <date> --window-end <date> [--today <date>]] [--config <path>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - Input is a JSON array of entities: [{\"id\":\"tech\",\"progress\":65,\"stats\":{\"done\":5,\"total\":9,\"overdue\":1}}, ...].\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - layout prints the scene layout JSON; render prints SVG to stdout (use --out for a file).\n\
  - Dates are YYYY-MM-DD; --today defaults to the current local date.\n\
  - --config loads a TreeConfig JSON overriding the built-in scene.\n\
"
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| CliError::BadDate(raw.to_string()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--spines" => args.spines = true,
            "--no-background" => args.no_background = true,
            "--elapsed" => {
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !v.is_finite() {
                    return Err(CliError::Usage(usage()));
                }
                args.elapsed = Some(v);
            }
            "--window-start" => {
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.window_start = Some(parse_date(raw)?);
            }
            "--window-end" => {
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.window_end = Some(parse_date(raw)?);
            }
            "--today" => {
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.today = Some(parse_date(raw)?);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config_path = Some(path.clone());
            }
            "--out" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(path.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

/// The only clock read in the workspace: everything below the CLI takes an
/// explicit elapsed fraction.
fn resolve_elapsed(args: &Args) -> Result<f64, CliError> {
    if let Some(elapsed) = args.elapsed {
        return Ok(elapsed.clamp(0.0, 1.0));
    }
    match (args.window_start, args.window_end) {
        (Some(start), Some(end)) => {
            let today = args
                .today
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            let total = (end - start).num_days();
            if total <= 0 {
                return Ok(1.0);
            }
            let elapsed = (today - start).num_days() as f64 / total as f64;
            Ok(elapsed.clamp(0.0, 1.0))
        }
        (None, None) => Ok(0.0),
        _ => Err(CliError::Usage(usage())),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let entities: Vec<Entity> = serde_json::from_str(&text)?;

    let config: TreeConfig = match args.config_path.as_deref() {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => TreeConfig::default(),
    };

    let options = SceneOptions {
        elapsed_fraction: resolve_elapsed(&args)?,
        config,
    };
    let scene = layout_scene(&entities, &options)?;

    match args.command {
        Command::Layout => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&scene)?
            } else {
                serde_json::to_string(&scene)?
            };
            write_text(&json, args.out.as_deref())?;
            if args.out.is_none() {
                println!();
            }
            Ok(())
        }
        Command::Render => {
            let svg = render_scene_svg(&scene, &SvgRenderOptions {
                include_spines: args.spines,
                background: if args.no_background {
                    None
                } else {
                    SvgRenderOptions::default().background
                },
                ..SvgRenderOptions::default()
            });
            write_text(&svg, args.out.as_deref())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
