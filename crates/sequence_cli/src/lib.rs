//! Argument handling and the layout run behind the `sequence` binary.

use anyhow::{Context as _, Error, anyhow, bail};
use html::parse_html;
use log::info;
use sequence::breakpoints::parse_breakpoint_list;
use sequence::{Breakpoint, Sequence, SequenceConfig, Window};
use std::fs;
use std::path::PathBuf;

pub const USAGE: &str = "\
usage: sequence <file.html> [options]

options:
  --width N            viewport width at load (default 1024)
  --breakpoints A,B    breakpoint widths, overriding the config file
  --prefix P           attribute prefix, overriding the config file (default sq)
  --resize N,M,...     widths to resize to after load, in order
  --config FILE        JSON config with \"prefix\" and \"breakpoints\"
  --json               print a JSON snapshot instead of HTML
  -h, --help           show this message
";

pub const DEFAULT_WIDTH: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub input: PathBuf,
    pub width: u32,
    pub breakpoints: Option<Vec<Breakpoint>>,
    pub prefix: Option<String>,
    pub resize: Vec<u32>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

fn parse_width(text: &str) -> Result<u32, Error> {
    text.trim()
        .parse()
        .with_context(|| format!("invalid width {text:?}"))
}

impl Options {
    /// Parses arguments (without the program name). Returns `None` when help
    /// was requested.
    ///
    /// Flags accept both `--flag value` and `--flag=value`.
    ///
    /// # Errors
    /// Fails on unknown flags, missing values, malformed numbers, or a
    /// missing input file argument.
    pub fn parse<I>(args: I) -> Result<Option<Self>, Error>
    where
        I: IntoIterator<Item = String>,
    {
        let mut input = None;
        let mut options = Self {
            input: PathBuf::new(),
            width: DEFAULT_WIDTH,
            breakpoints: None,
            prefix: None,
            resize: Vec::new(),
            config: None,
            json: false,
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "-h" || arg == "--help" {
                return Ok(None);
            }
            if arg == "--json" {
                options.json = true;
                continue;
            }
            let Some(flag) = arg.strip_prefix("--") else {
                if input.replace(PathBuf::from(&arg)).is_some() {
                    bail!("unexpected argument {arg:?}");
                }
                continue;
            };
            let (name, value) = match flag.split_once('=') {
                Some((name, value)) => (name.to_owned(), value.to_owned()),
                None => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("missing value for --{flag}"))?;
                    (flag.to_owned(), value)
                }
            };
            match name.as_str() {
                "width" => options.width = parse_width(&value)?,
                "breakpoints" => options.breakpoints = Some(parse_breakpoint_list(&value)?),
                "prefix" => options.prefix = Some(value),
                "resize" => {
                    options.resize = value
                        .split(',')
                        .filter(|entry| !entry.trim().is_empty())
                        .map(parse_width)
                        .collect::<Result<_, _>>()?;
                }
                "config" => options.config = Some(PathBuf::from(value)),
                _ => bail!("unknown option --{name}"),
            }
        }

        options.input = input.ok_or_else(|| anyhow!("missing input file"))?;
        Ok(Some(options))
    }

    /// The engine configuration: the config file if given, with command-line
    /// overrides applied.
    ///
    /// # Errors
    /// Fails if the config file cannot be loaded or the prefix is invalid.
    pub fn sequence_config(&self) -> Result<SequenceConfig, Error> {
        let mut config = match &self.config {
            Some(path) => SequenceConfig::from_path(path)?,
            None => SequenceConfig::default(),
        };
        if let Some(prefix) = &self.prefix {
            prefix.clone_into(&mut config.prefix);
        }
        if let Some(breakpoints) = &self.breakpoints {
            breakpoints.clone_into(&mut config.breakpoints);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Loads the document, lays it out at the load width and each resize width
/// in turn, and returns the final document as HTML or JSON.
///
/// # Errors
/// Fails if the input or config cannot be read or parsed, or if a layout
/// pass fails.
pub fn run(options: &Options) -> Result<String, Error> {
    let config = options.sequence_config()?;
    let markup = fs::read_to_string(&options.input)
        .with_context(|| format!("failed to read {}", options.input.display()))?;
    let document = parse_html(&markup)?;

    let mut window = Window::new(Sequence::from_config(&config)?, document);
    let summary = window.load(options.width)?;
    info!(
        "loaded {} at width {} (breakpoint {}): {summary:?}",
        options.input.display(),
        options.width,
        window.engine().active_breakpoint()
    );
    for width in &options.resize {
        match window.resize(*width)? {
            Some(pass) => info!(
                "resized to {width}: breakpoint {}, {pass:?}",
                window.engine().active_breakpoint()
            ),
            None => info!("resized to {width}: no breakpoint change"),
        }
    }

    let document = window.into_document();
    Ok(if options.json {
        document.to_json_string()
    } else {
        document.to_html()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| (*arg).to_owned()).collect()
    }

    #[test]
    fn parses_both_flag_forms() -> Result<(), Error> {
        let options = Options::parse(args(&[
            "page.html",
            "--width=700",
            "--breakpoints",
            "900,600",
            "--resize",
            "1000, 300",
            "--prefix=data-sq",
            "--json",
        ]))?;
        assert_eq!(
            options,
            Some(Options {
                input: PathBuf::from("page.html"),
                width: 700,
                breakpoints: Some(vec![Breakpoint::new(900), Breakpoint::new(600)]),
                prefix: Some("data-sq".to_owned()),
                resize: vec![1000, 300],
                config: None,
                json: true,
            })
        );
        Ok(())
    }

    #[test]
    fn help_short_circuits() -> Result<(), Error> {
        assert_eq!(Options::parse(args(&["--width", "5", "-h"]))?, None);
        Ok(())
    }

    #[test]
    fn reports_bad_arguments() {
        assert!(Options::parse(args(&[])).is_err());
        assert!(Options::parse(args(&["a.html", "b.html"])).is_err());
        assert!(Options::parse(args(&["a.html", "--width"])).is_err());
        assert!(Options::parse(args(&["a.html", "--width=wide"])).is_err());
        assert!(Options::parse(args(&["a.html", "--breakpoints=-600"])).is_err());
        assert!(Options::parse(args(&["a.html", "--colour=red"])).is_err());
    }
}
