use live_preview::{PreviewSession, PreviewView, SessionOptions};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Prints every callback instead of touching a page
struct TerminalView;

impl PreviewView for TerminalView {
    fn replace_preview(&mut self, html: &str) {
        println!("📄 Preview:\n{}\n", html);
    }

    fn refresh_highlight(&mut self, text: &str) {
        tracing::debug!("Highlight {} chars", text.len());
    }

    fn resize_editor(&mut self) {
        tracing::debug!("Resize editor");
    }

    fn typeset(&mut self) {
        println!("🧮 Typesetting math");
    }

    fn load_editor(&mut self, text: &str) {
        println!("📝 Loaded {} chars into the editor", text.len());
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("❌ {}", message);
    }
}

/// Streams stdin to a running preview server, one line per edit.
///
/// Each line is appended to the document and the full text is sent, the
/// same way the browser editor reports every keystroke.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "live_preview=info".into()),
        )
        .init();

    let page_url =
        std::env::var("LIVE_PREVIEW_PAGE_URL").unwrap_or_else(|_| "http://localhost:3000/".into());
    let options = SessionOptions::from_env()?;

    let session = PreviewSession::new(&page_url, options, TerminalView)?;
    println!("📡 Connecting to: {}\n", session.endpoint());

    let handle = session.start();
    let mut states = handle.state_changes();
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = *states.borrow_and_update();
            println!("🔌 Connection: {:?}", state);
        }
    });

    println!("⌨️  Type markdown, one line at a time. Ctrl-D to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut document = String::new();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    document.push_str(&line);
                    document.push('\n');
                    handle.edit(document.clone())?;
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    println!("\n👋 Tearing down...");
    handle.teardown().await;

    Ok(())
}
