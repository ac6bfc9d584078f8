use crate::core::ports::{Navigator, Notifier};

/// Prints the navigation instead of performing it. `quiet` keeps stdout
/// clean for `--json`.
pub struct ConsoleNavigator {
    pub quiet: bool,
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, path: &str) {
        if !self.quiet {
            println!("✅ Account activated; navigated to {path}");
        }
    }
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }
}
