//! UI rendering functions for TUI

use crate::tui::app::App;
use crate::tui::types::{Screen, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Main UI rendering function - dispatches to screen-specific render functions
pub fn ui(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Onboarding => render_onboarding(f, app),
        Screen::Login => render_login(f, app),
        Screen::Register => render_register(f, app),
        Screen::Home => render_home(f, app),
        Screen::AddTransaction => render_add_transaction(f, app),
        Screen::AddCategory => render_add_category(f, app),
        Screen::Advice => render_advice(f, app),
        Screen::Profile => render_profile(f, app),
    }
}

fn render_onboarding(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.onboarding_screen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(4)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(5),    // Slide body
                Constraint::Length(3), // Progress dots
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let slide = &screen.slides[screen.current_index];

        let title = Paragraph::new(slide.title)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let body = Paragraph::new(slide.description)
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(body, chunks[1]);

        // Progress dots
        let dots: Vec<Span> = (0..screen.slides.len())
            .map(|i| {
                if i == screen.current_index {
                    Span::styled("● ", Style::default().fg(Color::Cyan))
                } else {
                    Span::styled("○ ", Style::default().fg(Color::DarkGray))
                }
            })
            .collect();
        let progress = Paragraph::new(Line::from(dots)).alignment(Alignment::Center);
        f.render_widget(progress, chunks[2]);

        let help_text = if screen.is_last() {
            "Enter: Get Started | q: Quit"
        } else {
            "Enter: Next | s: Skip | q: Quit"
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[3]);
    }
}

fn render_login(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.login_screen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Email field
                Constraint::Length(3), // Password field
                Constraint::Length(3), // Status message
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let title = Paragraph::new("Welcome back")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let username_style = if screen.focus == crate::tui::screens::LoginField::Username {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let username_widget = Paragraph::new(screen.username.as_str())
            .style(username_style)
            .block(Block::default().borders(Borders::ALL).title("Email"));
        f.render_widget(username_widget, chunks[1]);

        let password_display = if screen.secure {
            "•".repeat(screen.password.chars().count())
        } else {
            screen.password.clone()
        };
        let password_style = if screen.focus == crate::tui::screens::LoginField::Password {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let password_widget = Paragraph::new(password_display)
            .style(password_style)
            .block(Block::default().borders(Borders::ALL).title("Password"));
        f.render_widget(password_widget, chunks[2]);

        render_status_line(f, chunks[3], screen.status_message.as_deref(), screen.is_error);

        let help_text = if screen.loading {
            "Signing in..."
        } else {
            "Tab: Next Field | Ctrl+S: Show/Hide Password | Enter: Sign In | F2: Create Account | Esc: Quit"
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[4]);
    }
}

fn render_register(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.register_screen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Email field
                Constraint::Length(3), // Password field
                Constraint::Length(3), // Confirm field
                Constraint::Length(3), // Terms checkbox
                Constraint::Length(3), // Status message
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let title = Paragraph::new("Create your account")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        use crate::tui::screens::RegisterField;
        let field_style = |field: RegisterField| {
            if screen.focus == field {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            }
        };

        let username_widget = Paragraph::new(screen.username.as_str())
            .style(field_style(RegisterField::Username))
            .block(Block::default().borders(Borders::ALL).title("Email"));
        f.render_widget(username_widget, chunks[1]);

        let password_widget = Paragraph::new("•".repeat(screen.password.chars().count()))
            .style(field_style(RegisterField::Password))
            .block(Block::default().borders(Borders::ALL).title("Password"));
        f.render_widget(password_widget, chunks[2]);

        let confirm_widget = Paragraph::new("•".repeat(screen.confirm_password.chars().count()))
            .style(field_style(RegisterField::Confirm))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Confirm Password"),
            );
        f.render_widget(confirm_widget, chunks[3]);

        let terms_mark = if screen.terms_accepted { "[x]" } else { "[ ]" };
        let terms_widget = Paragraph::new(format!("{} I accept the terms and conditions", terms_mark))
            .style(Style::default().fg(if screen.terms_accepted {
                Color::Green
            } else {
                Color::White
            }))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(terms_widget, chunks[4]);

        render_status_line(f, chunks[5], screen.status_message.as_deref(), screen.is_error);

        let help_text = if screen.loading {
            "Creating account..."
        } else {
            "Tab: Next Field | Ctrl+T: Toggle Terms | Enter: Sign Up | Esc: Back to Sign In"
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[6]);
    }
}

fn render_home(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.dashboard_screen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Balance summary
                Constraint::Min(6),    // Chart + recent transactions
                Constraint::Length(3), // Status / help
                Constraint::Length(3), // Tab bar
            ])
            .split(size);

        let title_text = if screen.loading {
            "Home - loading...".to_string()
        } else if screen.refreshing {
            "Home - refreshing...".to_string()
        } else {
            "Home".to_string()
        };
        let title = Paragraph::new(title_text)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        // Balance summary
        let summary_lines = vec![
            Line::from(vec![
                Span::styled("Balance: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:.2}", screen.overview.balance),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Income: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("+{:.2}", screen.overview.income),
                    Style::default().fg(Color::Green),
                ),
                Span::raw("   "),
                Span::styled("Expenses: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("-{:.2}", screen.overview.expense),
                    Style::default().fg(Color::Red),
                ),
            ]),
        ];
        let summary = Paragraph::new(summary_lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("This Month"));
        f.render_widget(summary, chunks[1]);

        // Chart + recent transactions side by side
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[2]);

        render_expense_chart(f, body[0], screen);
        render_recent_transactions(f, body[1], screen);

        if screen.status_message.is_some() {
            render_status_line(f, chunks[3], screen.status_message.as_deref(), screen.is_error);
        } else {
            let help = Paragraph::new("r/F5: Refresh | Tab: Next Tab | c: New Category | q: Quit")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(help, chunks[3]);
        }

        render_tab_bar(f, chunks[4], app.active_tab);
    }
}

fn render_expense_chart(f: &mut Frame, area: Rect, screen: &crate::tui::screens::DashboardScreen) {
    if screen.chart.is_empty() {
        let empty = Paragraph::new("No expenses yet")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Expenses"));
        f.render_widget(empty, area);
        return;
    }

    let total: f64 = screen.chart.iter().map(|e| e.amount).sum();
    let chart_lines: Vec<Line> = screen
        .chart
        .iter()
        .map(|entry| {
            let share = if total > 0.0 {
                entry.amount / total * 100.0
            } else {
                0.0
            };
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(hex_color(&entry.color))),
                Span::styled(
                    format!("{} ", entry.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:.2} ({:.0}%)", entry.amount, share),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let chart = Paragraph::new(chart_lines)
        .block(Block::default().borders(Borders::ALL).title("Expenses"));
    f.render_widget(chart, area);
}

fn render_recent_transactions(
    f: &mut Frame,
    area: Rect,
    screen: &crate::tui::screens::DashboardScreen,
) {
    let recent = screen.recent_transactions();
    if recent.is_empty() {
        let empty = Paragraph::new("No transactions yet. Press the + tab to add one!")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Recent"));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = recent
        .iter()
        .map(|tx| {
            let (sign, color) = match tx.kind {
                crate::models::FlowKind::Income => ("+", Color::Green),
                crate::models::FlowKind::Expense => ("-", Color::Red),
            };
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", tx.date),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{} ", tx.description),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{}{:.2}", sign, tx.amount.abs()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Recent"));
    f.render_widget(list, area);
}

fn render_add_transaction(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.add_transaction_screen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Kind toggle
                Constraint::Length(3), // Amount field
                Constraint::Length(3), // Description field
                Constraint::Min(4),    // Category picker
                Constraint::Length(3), // Status message
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let title = Paragraph::new("New Transaction")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let kind_widget = Paragraph::new(screen.kind.label())
            .style(
                Style::default()
                    .fg(match screen.kind {
                        crate::models::FlowKind::Income => Color::Green,
                        crate::models::FlowKind::Expense => Color::Red,
                    })
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Type"));
        f.render_widget(kind_widget, chunks[1]);

        use crate::tui::screens::TransactionField;
        let amount_style = if screen.focus == TransactionField::Amount {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let amount_widget = Paragraph::new(screen.amount_input.as_str())
            .style(amount_style)
            .block(Block::default().borders(Borders::ALL).title("Amount"));
        f.render_widget(amount_widget, chunks[2]);

        let description_style = if screen.focus == TransactionField::Description {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let description_widget = Paragraph::new(screen.description_input.as_str())
            .style(description_style)
            .block(Block::default().borders(Borders::ALL).title("Description"));
        f.render_widget(description_widget, chunks[3]);

        // Category picker
        if screen.loading_categories {
            let loading = Paragraph::new("Loading categories...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Category"));
            f.render_widget(loading, chunks[4]);
        } else if screen.categories.is_empty() {
            let empty = Paragraph::new("No categories for this type. Press c to create one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Category"));
            f.render_widget(empty, chunks[4]);
        } else {
            let items: Vec<ListItem> = screen
                .categories
                .iter()
                .enumerate()
                .map(|(i, category)| {
                    let content = if i == screen.selected_category {
                        Line::from(vec![
                            Span::styled("→ ", Style::default().fg(Color::Yellow)),
                            Span::styled("■ ", Style::default().fg(hex_color(&category.color))),
                            Span::styled(
                                category.name.as_str(),
                                Style::default()
                                    .fg(Color::Yellow)
                                    .add_modifier(Modifier::BOLD),
                            ),
                        ])
                    } else {
                        Line::from(vec![
                            Span::raw("  "),
                            Span::styled("■ ", Style::default().fg(hex_color(&category.color))),
                            Span::styled(category.name.as_str(), Style::default().fg(Color::White)),
                        ])
                    };
                    ListItem::new(content)
                })
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title("Category"));
            f.render_widget(list, chunks[4]);
        }

        render_status_line(f, chunks[5], screen.status_message.as_deref(), screen.is_error);

        let help_text = if screen.loading {
            "Saving..."
        } else {
            "Tab: Next Field | ↑↓: Category | Ctrl+T: Income/Expense | Ctrl+N: New Category | Enter: Save | Esc: Back"
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[6]);
    }
}

fn render_add_category(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.add_category_screen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Kind toggle
                Constraint::Length(3), // Name field
                Constraint::Length(3), // Color field
                Constraint::Length(3), // Status message
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let title = Paragraph::new("New Category")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let kind_widget = Paragraph::new(screen.kind.label())
            .style(
                Style::default()
                    .fg(match screen.kind {
                        crate::models::FlowKind::Income => Color::Green,
                        crate::models::FlowKind::Expense => Color::Red,
                    })
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Type"));
        f.render_widget(kind_widget, chunks[1]);

        use crate::tui::screens::CategoryField;
        let name_style = if screen.focus == CategoryField::Name {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let name_widget = Paragraph::new(screen.name_input.as_str())
            .style(name_style)
            .block(Block::default().borders(Borders::ALL).title("Name"));
        f.render_widget(name_widget, chunks[2]);

        let color_style = if screen.focus == CategoryField::Color {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(hex_color(&screen.color_input))
        };
        let color_widget = Paragraph::new(screen.color_input.as_str())
            .style(color_style)
            .block(Block::default().borders(Borders::ALL).title("Color"));
        f.render_widget(color_widget, chunks[3]);

        render_status_line(f, chunks[4], screen.status_message.as_deref(), screen.is_error);

        let help_text = if screen.loading {
            "Saving..."
        } else {
            "Tab: Next Field | Ctrl+T: Income/Expense | Enter: Save | Esc: Back"
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[5]);
    }
}

fn render_advice(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.advice_screen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(5),    // Message history
                Constraint::Length(3), // Input box
                Constraint::Length(3), // Tab bar
            ])
            .split(size);

        let title_text = if screen.loading {
            "Advisor is typing..."
        } else {
            "Advisor"
        };
        let title = Paragraph::new(title_text)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        // Visible window over the history based on the scroll offset
        let total_messages = screen.messages.len();
        let visible_height = chunks[1].height.saturating_sub(2) as usize;
        let start_idx = screen.scroll_offset.min(total_messages);
        let end_idx = (start_idx + visible_height).min(total_messages);

        let message_lines: Vec<Line> = screen.messages[start_idx..end_idx]
            .iter()
            .map(|msg| {
                let (label, color) = if msg.is_ai {
                    ("Advisor", Color::Blue)
                } else {
                    ("You", Color::Green)
                };
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", msg.time),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{}: ", label),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(msg.text.as_str(), Style::default().fg(Color::White)),
                ])
            })
            .collect();

        let messages_widget = Paragraph::new(message_lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Messages ({}/{})", end_idx, total_messages)),
            );
        f.render_widget(messages_widget, chunks[1]);

        let input_widget = Paragraph::new(screen.input.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Ask about your finances"),
            );
        f.render_widget(input_widget, chunks[2]);

        render_tab_bar(f, chunks[3], app.active_tab);
    }
}

fn render_profile(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.profile_screen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(7),    // Menu
                Constraint::Length(3), // Status / help
                Constraint::Length(3), // Tab bar
            ])
            .split(size);

        let title = Paragraph::new("Profile")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let menu_items: Vec<ListItem> = screen
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let content = if i == screen.selected_index {
                    Line::from(vec![
                        Span::styled("→ ", Style::default().fg(Color::Yellow)),
                        Span::styled(
                            item.label(),
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(item.label(), Style::default().fg(Color::White)),
                    ])
                };
                ListItem::new(content)
            })
            .collect();

        let menu = List::new(menu_items)
            .block(Block::default().borders(Borders::ALL).title("Account"));
        f.render_widget(menu, chunks[1]);

        let help_text = if let Some(status) = &screen.status_message {
            status.clone()
        } else {
            format!(
                "{} | Navigation: ↑↓ or j/k | Select: Enter | q: Quit",
                screen.selected_item().description()
            )
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[2]);

        render_tab_bar(f, chunks[3], app.active_tab);
    }
}

/// Bottom tab bar with the highlighted center add button
fn render_tab_bar(f: &mut Frame, area: Rect, active: Tab) {
    let tabs = Tab::all();
    let spans: Vec<Span> = tabs
        .iter()
        .flat_map(|tab| {
            let style = if *tab == Tab::AddNew {
                // Center button stands out regardless of selection
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if *tab == active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            vec![Span::styled(format!(" {} ", tab.label()), style), Span::raw("  ")]
        })
        .collect();

    let bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, area);
}

/// Shared status line: red on error, green otherwise
fn render_status_line(f: &mut Frame, area: Rect, message: Option<&str>, is_error: bool) {
    let status_text = message.unwrap_or("");
    let status_color = if is_error { Color::Red } else { Color::Green };
    let status_widget = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status_widget, area);
}

/// Parse a `#rrggbb` string into a terminal color, gray on malformed input
///
/// The color input field accepts arbitrary characters, so this must never
/// slice the string at byte offsets.
pub(crate) fn hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Color::Gray;
    }
    match u32::from_str_radix(hex, 16) {
        Ok(rgb) => Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        Err(_) => Color::Gray,
    }
}
