//! Finbook TUI (Terminal User Interface)
//!
//! A terminal-based client for the Finbook personal finance service.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use finbook::tui::{ui::ui, App, Screen, Tab};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

fn main() -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new()?;

    // Run main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Apply any finished background request to its screen
        app.poll_pending();

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match app.current_screen {
                    Screen::Onboarding => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            app.advance_onboarding();
                        }
                        KeyCode::Char('s') => {
                            app.skip_onboarding();
                        }
                        _ => {}
                    },
                    Screen::Login => match key.code {
                        KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Enter => {
                            app.submit_login();
                        }
                        KeyCode::Tab => {
                            if let Some(screen) = &mut app.login_screen {
                                screen.next_field();
                            }
                        }
                        KeyCode::F(2) => {
                            app.show_register();
                        }
                        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            if let Some(screen) = &mut app.login_screen {
                                screen.toggle_secure();
                            }
                        }
                        KeyCode::Backspace => {
                            if let Some(screen) = &mut app.login_screen {
                                screen.backspace();
                            }
                        }
                        KeyCode::Char(c) if !c.is_control() => {
                            if let Some(screen) = &mut app.login_screen {
                                screen.add_char(c);
                            }
                        }
                        _ => {}
                    },
                    Screen::Register => match key.code {
                        KeyCode::Esc => {
                            app.show_login();
                        }
                        KeyCode::Enter => {
                            app.submit_register();
                        }
                        KeyCode::Tab => {
                            if let Some(screen) = &mut app.register_screen {
                                screen.next_field();
                            }
                        }
                        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            if let Some(screen) = &mut app.register_screen {
                                screen.toggle_terms();
                            }
                        }
                        KeyCode::Backspace => {
                            if let Some(screen) = &mut app.register_screen {
                                screen.backspace();
                            }
                        }
                        KeyCode::Char(c) if !c.is_control() => {
                            if let Some(screen) = &mut app.register_screen {
                                screen.add_char(c);
                            }
                        }
                        _ => {}
                    },
                    Screen::Home => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Char('r') | KeyCode::F(5) => {
                            app.fetch_dashboard(true);
                        }
                        KeyCode::Tab => {
                            app.select_tab(next_tab(app.active_tab));
                        }
                        KeyCode::Char('c') => {
                            app.show_add_category();
                        }
                        KeyCode::Char('+') => {
                            app.show_add_transaction();
                        }
                        _ => {}
                    },
                    Screen::AddTransaction => match key.code {
                        KeyCode::Esc => {
                            app.back_to_home();
                        }
                        KeyCode::Enter => {
                            app.submit_transaction();
                        }
                        KeyCode::Tab => {
                            if let Some(screen) = &mut app.add_transaction_screen {
                                screen.next_field();
                            }
                        }
                        KeyCode::Down => {
                            if let Some(screen) = &mut app.add_transaction_screen {
                                screen.next_category();
                            }
                        }
                        KeyCode::Up => {
                            if let Some(screen) = &mut app.add_transaction_screen {
                                screen.previous_category();
                            }
                        }
                        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.toggle_transaction_kind();
                        }
                        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.show_add_category();
                        }
                        KeyCode::Backspace => {
                            if let Some(screen) = &mut app.add_transaction_screen {
                                screen.backspace();
                            }
                        }
                        KeyCode::Char(c) if !c.is_control() => {
                            if let Some(screen) = &mut app.add_transaction_screen {
                                screen.add_char(c);
                            }
                        }
                        _ => {}
                    },
                    Screen::AddCategory => match key.code {
                        KeyCode::Esc => {
                            app.show_add_transaction();
                        }
                        KeyCode::Enter => {
                            app.submit_category();
                        }
                        KeyCode::Tab => {
                            if let Some(screen) = &mut app.add_category_screen {
                                screen.next_field();
                            }
                        }
                        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            if let Some(screen) = &mut app.add_category_screen {
                                screen.toggle_kind();
                            }
                        }
                        KeyCode::Backspace => {
                            if let Some(screen) = &mut app.add_category_screen {
                                screen.backspace();
                            }
                        }
                        KeyCode::Char(c) if !c.is_control() => {
                            if let Some(screen) = &mut app.add_category_screen {
                                screen.add_char(c);
                            }
                        }
                        _ => {}
                    },
                    Screen::Advice => match key.code {
                        KeyCode::Esc => {
                            app.select_tab(Tab::Home);
                        }
                        KeyCode::Enter => {
                            app.send_chat_message();
                        }
                        KeyCode::Tab => {
                            app.select_tab(next_tab(app.active_tab));
                        }
                        KeyCode::PageUp => {
                            if let Some(screen) = &mut app.advice_screen {
                                screen.scroll_up();
                            }
                        }
                        KeyCode::PageDown => {
                            if let Some(screen) = &mut app.advice_screen {
                                let max_offset = screen.messages.len().saturating_sub(1);
                                screen.scroll_down(max_offset);
                            }
                        }
                        KeyCode::Backspace => {
                            if let Some(screen) = &mut app.advice_screen {
                                screen.backspace();
                            }
                        }
                        KeyCode::Char(c) if !c.is_control() => {
                            if let Some(screen) = &mut app.advice_screen {
                                screen.add_char(c);
                            }
                        }
                        _ => {}
                    },
                    Screen::Profile => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            if let Some(screen) = &mut app.profile_screen {
                                screen.next();
                            }
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            if let Some(screen) = &mut app.profile_screen {
                                screen.previous();
                            }
                        }
                        KeyCode::Enter => {
                            app.select_profile_item();
                        }
                        KeyCode::Tab => {
                            app.select_tab(next_tab(app.active_tab));
                        }
                        _ => {}
                    },
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn next_tab(active: Tab) -> Tab {
    match active {
        Tab::Home => Tab::Advice,
        Tab::Advice => Tab::AddNew,
        Tab::AddNew => Tab::Profile,
        Tab::Profile => Tab::Home,
    }
}
