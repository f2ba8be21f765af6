//! Line-oriented driver: turns stdin lines into palette input and prints the
//! resulting view after each one.

use keycode::{Key, KeyEvent};
use palette_engine::{KeyResponse, Outcome, Palette, Selection};
use tokio::{
    io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader},
    task::JoinSet,
};
use tracing::{debug, error, info};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// `:open`
    Open,
    /// `:close`
    Close,
    /// `:toggle`, delivered as the hotkey chord.
    Toggle,
    /// A navigation or selection key (`:down`, `:up`, `:home`, `:end`,
    /// `:enter`, `:esc`).
    Key(Key),
    /// `:quit`
    Quit,
    /// Anything else replaces the query.
    Query(String),
}

impl Input {
    /// Parse a line. Unknown `:words` are treated as query text.
    pub fn parse(line: &str) -> Self {
        match line.trim_end_matches(['\r', '\n']) {
            ":open" => Self::Open,
            ":close" => Self::Close,
            ":toggle" => Self::Toggle,
            ":down" => Self::Key(Key::DownArrow),
            ":up" => Self::Key(Key::UpArrow),
            ":home" => Self::Key(Key::Home),
            ":end" => Self::Key(Key::End),
            ":enter" => Self::Key(Key::Return),
            ":esc" => Self::Key(Key::Escape),
            ":quit" | ":q" => Self::Quit,
            other => Self::Query(other.to_string()),
        }
    }
}

/// Render the palette the way a list UI would show it.
pub fn render(palette: &Palette) -> String {
    if !palette.is_open() {
        return "(closed)\n".to_string();
    }
    let mut out = match palette.query() {
        "" => format!("> [{}]\n", palette.placeholder()),
        q => format!("> {q}\n"),
    };
    if palette.is_empty_state() {
        out.push_str(&format!("  {}\n", palette.empty_message()));
        return out;
    }
    let selected = palette.selected_index();
    let mut index = 0usize;
    for group in palette.view().groups() {
        if let Some(label) = &group.label {
            out.push_str(&format!("{label}\n"));
        }
        for cmd in &group.commands {
            let marker = if index == selected { '>' } else { ' ' };
            out.push_str(&format!(" {marker} {}", cmd.label));
            if let Some(shortcut) = &cmd.shortcut {
                out.push_str(&format!("  [{shortcut}]"));
            }
            out.push('\n');
            index += 1;
        }
    }
    out.push_str(&format!("  {}/{}\n", selected + 1, palette.result_count()));
    out
}

/// An action that has finished, with the command that ran it.
#[derive(Debug)]
pub struct Finished {
    /// Id of the selected command.
    pub command_id: String,
    /// How the action ended.
    pub outcome: Outcome,
}

/// Action outcomes still running for this session.
pub type Pending = JoinSet<Finished>;

/// Track a selection's outcome on `pending` until the session drains it.
fn spawn_outcome(pending: &mut Pending, selection: Selection) {
    let Selection {
        command_id,
        outcome,
        closed,
    } = selection;
    debug!(id = %command_id, closed, "selected");
    pending.spawn(async move {
        Finished {
            command_id,
            outcome: outcome.await,
        }
    });
}

/// Log one finished action.
fn report(finished: &Finished) {
    let id = &finished.command_id;
    match &finished.outcome {
        Outcome::Completed => info!(id = %id, "action_completed"),
        Outcome::Failed(e) => error!(id = %id, error = %e, "action_failed"),
        Outcome::Skipped => info!(id = %id, "action_skipped"),
    }
}

/// Wait for every outstanding action and report each one.
pub async fn drain(pending: &mut Pending) -> Vec<Finished> {
    let mut done = Vec::new();
    while let Some(joined) = pending.join_next().await {
        match joined {
            Ok(finished) => {
                report(&finished);
                done.push(finished);
            }
            Err(e) => error!(error = %e, "action_task_failed"),
        }
    }
    done
}

/// Apply one input. Returns `false` when the session should end.
pub fn apply(palette: &mut Palette, pending: &mut Pending, input: Input) -> bool {
    match input {
        Input::Open => {
            palette.open();
        }
        Input::Close => {
            palette.close();
        }
        Input::Toggle => {
            let mut event = KeyEvent::from(palette.hotkey().chord());
            respond(pending, palette.handle_key(&mut event));
        }
        Input::Key(key) => {
            let mut event = KeyEvent::new(key);
            respond(pending, palette.handle_key(&mut event));
        }
        Input::Query(q) => {
            if !palette.set_query(q) {
                debug!("query_ignored_while_closed");
            }
        }
        Input::Quit => return false,
    }
    true
}

/// Hand any selection off to the runtime.
fn respond(pending: &mut Pending, response: KeyResponse) {
    if let KeyResponse::Selected(selection) = response {
        spawn_outcome(pending, selection);
    }
}

/// Feed `input` lines to `palette`, writing the view to `out` after each.
///
/// Ends on EOF or `:quit`, then waits for every selected action to finish.
pub async fn drive<R, W>(palette: &mut Palette, input: R, mut out: W) -> io::Result<Vec<Finished>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut pending = Pending::new();
    palette.open();
    out.write_all(render(palette).as_bytes()).await?;
    out.flush().await?;
    while let Some(line) = lines.next_line().await? {
        if !apply(palette, &mut pending, Input::parse(&line)) {
            break;
        }
        out.write_all(render(palette).as_bytes()).await?;
        out.flush().await?;
    }
    if !pending.is_empty() {
        debug!(count = pending.len(), "waiting_for_actions");
    }
    Ok(drain(&mut pending).await)
}

/// Drive `palette` from stdin until EOF or `:quit`. Returns how many actions
/// failed.
pub async fn run(mut palette: Palette) -> io::Result<usize> {
    let finished = drive(&mut palette, BufReader::new(io::stdin()), io::stdout()).await;
    if let Err(e) = palette.shutdown() {
        error!(error = %e, "hotkey_shutdown_failed");
    }
    let failed = finished?.iter().filter(|f| f.outcome.is_failed()).count();
    Ok(failed)
}
