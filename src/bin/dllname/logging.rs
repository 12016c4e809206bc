use std::io::{IsTerminal, Write};

use log::Level;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

use crate::arguments::{CliArgs, ColorOption};

/// Logger writing every record to stderr. Stdout only carries the DLL name.
struct CliLogger {
    stderr: BufferWriter,
}

impl CliLogger {
    fn level_style(level: Level) -> (Color, &'static str) {
        match level {
            Level::Error => (Color::Red, "error:"),
            Level::Warn => (Color::Yellow, "warn:"),
            Level::Info => (Color::Green, "info:"),
            Level::Debug => (Color::White, "debug:"),
            Level::Trace => (Color::Blue, "trace:"),
        }
    }
}

impl log::Log for CliLogger {
    #[inline]
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if record.args().as_str().is_some_and(|args| args.is_empty()) {
            return;
        }

        let mut buffer = self.stderr.buffer();
        let (color, label) = Self::level_style(record.level());

        let _ = write!(buffer, "{}: ", env!("CARGO_BIN_NAME"));
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(buffer, "{label}");
        let _ = buffer.reset();
        let _ = writeln!(buffer, " {}", record.args());

        let _ = self.stderr.print(&buffer);
    }

    fn flush(&self) {}
}

/// Sets up logging for the cli
pub fn setup_logger(args: &CliArgs) -> anyhow::Result<()> {
    let color_choice = match args.color {
        ColorOption::Auto
            if !std::io::stderr().is_terminal()
                || std::env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb"))
                || std::env::var_os("NO_COLOR").is_some() =>
        {
            ColorChoice::Never
        }
        option => option.into(),
    };

    log::set_boxed_logger(Box::from(CliLogger {
        stderr: BufferWriter::stderr(color_choice),
    }))
    .map(|()| log::set_max_level(args.verbose.log_level_filter()))?;

    Ok(())
}
