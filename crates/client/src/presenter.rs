/// Where the client shows its outcomes to the user.
pub trait Presenter {
    /// A modal, one-off message.
    fn alert(&mut self, message: &str);

    /// Replaces the result area with `lines`.
    fn render_result(&mut self, lines: &[String]);

    /// Reveals the sketch image at `url`.
    fn show_sketch(&mut self, url: &str);
}

/// Prints alerts and results to stdout. Relative sketch URLs are resolved
/// against the server base URL so they can be opened directly.
pub struct TerminalPresenter {
    base_url: String,
}

impl TerminalPresenter {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn sketch_link(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }
}

impl Presenter for TerminalPresenter {
    fn alert(&mut self, message: &str) {
        println!("{message}");
    }

    fn render_result(&mut self, lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }

    fn show_sketch(&mut self, url: &str) {
        println!("Sketch: {}", self.sketch_link(url));
    }
}
