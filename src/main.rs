// cargo watch -x 'fmt' -x 'run'  // 'run -- lobby'

use gbans_console::api::{ApiClient, ServerData};
use gbans_console::browser::ServerBrowser;
use gbans_console::check_for_duplicate_servers;
use gbans_console::config;
use gbans_console::flash::{FlashBus, FlashLevel};
use gbans_console::lobby::{self, LobbyConnection, LobbyEvent, LobbyView, MsgType};
use gbans_console::output;
use itertools::Itertools;
use std::error::Error;
use std::io::BufRead;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let client = ApiClient::new(&config::api_base_url(), &config::api_token())?;

    match std::env::args().nth(1).as_deref() {
        Some("lobby") => run_lobby(&client).await,
        Some("csv") => run_servers(&client, true).await,
        _ => run_servers(&client, false).await,
    }
}

/// Fetch (or replay from cache), filter, sort, and print the server table.
async fn run_servers(client: &ApiClient, as_csv: bool) -> Result<(), Box<dyn Error>> {
    let mut flashes = FlashBus::new(config::FLASH_CAPACITY);
    let mut browser = ServerBrowser::new();

    if let Err(e) = browser.refresh(client, None).await {
        flashes.send(FlashLevel::Error, &format!("Failed to load servers: {e}"));
        output::print_flashes(&mut flashes);
        return Ok(());
    }

    if let Some(data) = browser.data() {
        if let Err(e) = check_for_duplicate_servers(data) {
            flashes.send(FlashLevel::Warn, &format!("Server roster: {e}"));
        }
    }

    let rows = browser.rows();
    if as_csv {
        output::server_print(&ServerData {
            count: rows.len() as i64,
            data: rows,
        })?;
    } else {
        output::print_servers(&rows);
    }
    output::print_flashes(&mut flashes);
    Ok(())
}

/// Attach to the quickplay lobby and relay chat between stdin and the socket.
async fn run_lobby(client: &ApiClient) -> Result<(), Box<dyn Error>> {
    let url = lobby::lobby_url(client.base(), client.token())?;
    let (conn, mut events) = LobbyConnection::open(url);
    let mut view = LobbyView::new();

    // stdin is blocking, bridge it over a channel
    let (tx_line, mut rx_line) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            if tx_line.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            event = events.recv() => match event {
                None => break,
                Some(LobbyEvent::Connected) => {
                    view.log_event("Lobby connection opened");
                    show_latest(&view);
                }
                Some(LobbyEvent::Closed(reason)) => {
                    view.log_event(&reason);
                    show_latest(&view);
                }
                Some(LobbyEvent::GaveUp) => {
                    view.log_event("Lobby is unreachable, giving up");
                    show_latest(&view);
                    break;
                }
                Some(LobbyEvent::Inbound(envelope)) => {
                    let joined = envelope.msg_type == MsgType::JoinLobbySuccess.code();
                    let before = view.history_len();
                    view.apply(&envelope);
                    if view.history_len() > before {
                        show_latest(&view);
                    }
                    if joined {
                        println!(
                            "Lobby {}: {}",
                            view.lobby.lobby_id,
                            view.lobby.clients.iter().map(|c| &c.user.name).join(", ")
                        );
                    }
                }
            },
            line = rx_line.recv() => match line.as_deref() {
                None | Some("/quit") => break,
                Some("") => {}
                Some("/leave") => {
                    conn.send(lobby::leave_lobby_request(&view.lobby.lobby_id)?)?;
                }
                Some(input) if input.starts_with("/join ") => {
                    match lobby::join_lobby_request(input.trim_start_matches("/join ").trim()) {
                        Ok(envelope) => conn.send(envelope)?,
                        Err(e) => {
                            view.log_event(&e.to_string());
                            show_latest(&view);
                        }
                    }
                }
                Some(input) => {
                    conn.send(lobby::chat_message(input)?)?;
                }
            },
        }
    }

    conn.close().await;
    Ok(())
}

fn show_latest(view: &LobbyView) {
    if let Some(msg) = view.latest() {
        output::print_lobby_line(msg);
    }
}
