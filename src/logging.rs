extern crate alloc;

use {
    alloc::boxed::Box,
    core::{cell::RefCell, fmt::Write},
};

struct WriterLogger<W> {
    writer: critical_section::Mutex<RefCell<W>>,
    level: log::LevelFilter,
}

impl<W> WriterLogger<W> {
    fn new(writer: W, level: log::LevelFilter) -> Self {
        Self {
            writer: critical_section::Mutex::new(RefCell::new(writer)),
            level,
        }
    }
}

impl<W: Send + Write> log::Log for WriterLogger<W> {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        critical_section::with(|cs| {
            writeln!(
                self.writer.borrow(cs).borrow_mut(),
                "{} [{}] {}",
                record.level(),
                record.module_path().unwrap_or("bin"),
                record.args()
            )
            .ok();
        })
    }

    fn flush(&self) {}
}

/// Routes the `log` facade to `writer`. Later calls are ignored.
///
/// The management core has no compare-and-swap, so this goes through the racy
/// setters.
///
/// # Safety
///
/// Must not race with any other logging call; call it once at the top of
/// `main` on the single hart.
pub unsafe fn init_logging<W: Send + Write + 'static>(writer: W, level: log::LevelFilter) {
    log::set_max_level_racy(level);
    log::set_logger_racy(Box::leak(Box::new(WriterLogger::new(writer, level)))).ok();
}
