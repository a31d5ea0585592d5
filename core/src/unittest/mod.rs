pub mod setup {
    pub mod log {
        use std::sync::Once;
        static SETUP: Once = Once::new();
        pub fn configure() {
            configure_level(log::LevelFilter::Trace)
        }
        pub fn configure_level(level: log::LevelFilter) {
            SETUP.call_once(|| {
                use colored::*;
                use std::io::Write;
                let _ = env_logger::builder()
                    .format(|buf, record| {
                        let ts = buf.timestamp_nanos();
                        let level = match record.level() {
                            log::Level::Error => "ERROR".red(),
                            log::Level::Warn => "WARN ".yellow(),
                            log::Level::Info => "INFO ".green(),
                            log::Level::Debug => "DEBUG".blue(),
                            log::Level::Trace => "TRACE".blue(),
                        };
                        let target = record.target();
                        let args = record.args();
                        let thread = std::thread::current();
                        let id = thread.id();
                        let name = thread.name().map(|name| name.to_owned()).unwrap_or_else(|| format!("Thread-{id:?}"));
                        writeln!(buf, "{ts} {level} ({name}) {target} {args}")
                    })
                    .is_test(true)
                    .filter_level(level)
                    .try_init();
            });
        }
    }
    pub mod data {
        use std::num::NonZeroUsize;

        pub fn capacity(n: usize) -> NonZeroUsize {
            NonZeroUsize::new(n).expect("capacity must be non zero")
        }
        /// Values that exercise both signs and the `i32` edges
        pub fn sample_values() -> Vec<i32> {
            vec![5, -3, 1000, 0, i32::MIN, i32::MAX, -1]
        }
    }
}
