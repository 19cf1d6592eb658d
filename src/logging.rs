use anyhow::Result;
use log::LevelFilter;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    #[default]
    Default,
    Verbose,
    Quiet,
    Silent,
}

impl LogLevel {
    fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Default => LevelFilter::Info,
            LogLevel::Verbose => LevelFilter::Debug,
            LogLevel::Quiet => LevelFilter::Warn,
            LogLevel::Silent => LevelFilter::Off,
        }
    }
}

pub fn set_up_logging(level: LogLevel) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level.level_filter())
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
