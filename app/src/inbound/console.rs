use anyhow::Context;
use futures::{StreamExt, TryStreamExt, future, stream};
use internal::{domain::action::PanelAction, port::panel::PanelDriverPort};
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Stand-in for the panel's buttons: one word per line.
#[derive(Debug, PartialEq)]
pub enum ConsoleInput {
    Trigger(PanelAction),
    Help,
    Quit,
    Blank,
    Unknown(String),
}

impl ConsoleInput {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "" => ConsoleInput::Blank,
            "help" | "?" => ConsoleInput::Help,
            "quit" | "exit" => ConsoleInput::Quit,
            word => word
                .parse::<PanelAction>()
                .map(ConsoleInput::Trigger)
                .unwrap_or_else(|_| ConsoleInput::Unknown(word.to_string())),
        }
    }
}

pub fn help() -> String {
    let actions: Vec<String> = PanelAction::ALL
        .iter()
        .map(|action| format!("  {:<10} {}", action.keyword(), action.label()))
        .collect();
    format!("Available actions:\n{}\n  {:<10} Leave the panel", actions.join("\n"), "quit")
}

/// Reads actions until `quit` or end of input. Lines are handled
/// concurrently, so an action typed while a sensor reading is pending
/// reaches the panel right away and is answered by it.
pub async fn run<P, R>(panel: &P, input: R) -> anyhow::Result<()>
where
    P: PanelDriverPort,
    R: AsyncBufRead + Unpin,
{
    let lines = stream::unfold(input.lines(), |mut lines| async move {
        match lines.next_line().await {
            Ok(Some(line)) => Some((Ok(line), lines)),
            Ok(None) => None,
            Err(e) => Some((Err(e), lines)),
        }
    });
    lines
        .map_ok(|line| ConsoleInput::parse(&line))
        .take_while(|input| future::ready(!matches!(input, Ok(ConsoleInput::Quit))))
        .try_for_each_concurrent(None, |input| async move {
            match input {
                ConsoleInput::Trigger(action) => {
                    debug!("{action} triggered from console");
                    panel.on_action_triggered(action).await;
                }
                ConsoleInput::Help => println!("{}", help()),
                ConsoleInput::Unknown(word) => println!("Unknown action '{word}'\n{}", help()),
                ConsoleInput::Blank | ConsoleInput::Quit => {}
            }
            Ok::<(), std::io::Error>(())
        })
        .await
        .context("Failed to read console input")
}
