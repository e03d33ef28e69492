// Terminal front end for the Roadies chat controller.
//
//   /open  /close  /N (activate the N-th suggestion)  /quit
//   anything else is typed into the input field and sent.

use anyhow::Context;
use roadies_chat::{
    config::WidgetConfig,
    init_tracing,
    widget::{Controller, HttpBackend, TerminalView},
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = WidgetConfig::from_env()?;
    let backend = HttpBackend::new(config.api_url.clone(), config.request_timeout)
        .context("building http client")?;
    let mut widget = Controller::new(config, backend, TerminalView::new(std::io::stdout()));

    widget.open();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "/quit" => break,
            "/open" => widget.open(),
            "/close" => widget.close(),
            cmd if cmd.starts_with('/') => {
                let picked = cmd[1..]
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| widget.state().suggestions().get(i))
                    .map(|s| s.label.clone());
                match picked {
                    Some(label) => {
                        widget.activate_suggestion(&label).await;
                    }
                    None => eprintln!("unknown command {cmd}"),
                }
            }
            text => {
                if !widget.state().is_panel_visible() {
                    widget.open();
                }
                widget.set_input(text);
                widget.send(None).await;
            }
        }
    }
    Ok(())
}
