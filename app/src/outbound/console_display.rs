use internal::{domain::rendering::Rendering, port::panel::DisplayDrivenPort};

/// Prints renderings to stdout, one timestamped line per message.
pub struct ConsoleDisplay;

impl DisplayDrivenPort for ConsoleDisplay {
    fn render(&self, rendering: &Rendering) {
        println!("{}", format_rendering(rendering));
    }
}

pub fn format_rendering(rendering: &Rendering) -> String {
    let at = rendering.rendered_at;
    let prefix = format!("[{:02}:{:02}:{:02}] {:<5}", at.hour(), at.minute(), at.second(), rendering.style);
    let indent = " ".repeat(prefix.len() + 1);
    format!("{} {}", prefix, rendering.message.replace('\n', &format!("\n{indent}")))
}
