use anyhow::Result;
use budget_tracker::cli::format_money;
use budget_tracker::db::format_timestamp;
use budget_tracker::{Category, Transaction, TransactionType, UNKNOWN_CATEGORY};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::collections::HashMap;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Categories,
    Ledger,
    Views,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    None,
    AllTransactions,
    Income,
    Expense,
    ByCategory(i64),
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Categories => Page::Ledger,
            Page::Ledger => Page::Views,
            Page::Views => Page::Categories,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Categories => Page::Views,
            Page::Ledger => Page::Categories,
            Page::Views => Page::Ledger,
        }
    }
}

/// Per-category row on the Categories page
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    pub count: usize,
    pub income: f64,
    pub expense: f64,
}

pub struct App {
    pub transactions: Vec<Transaction>,
    pub filtered_transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub category_names: HashMap<i64, String>,
    pub balance: f64,
    pub state: TableState,
    pub categories_state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
    pub active_filter: FilterType,
}

impl App {
    pub fn new(transactions: Vec<Transaction>, categories: Vec<Category>, balance: f64) -> Self {
        let mut state = TableState::default();
        if !transactions.is_empty() {
            state.select(Some(0));
        }

        let mut categories_state = TableState::default();
        if !categories.is_empty() {
            categories_state.select(Some(0));
        }

        let category_names = categories
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();

        Self {
            filtered_transactions: transactions.clone(),
            transactions,
            categories,
            category_names,
            balance,
            state,
            categories_state,
            current_page: Page::Ledger,
            show_detail: false,
            active_filter: FilterType::None,
        }
    }

    pub fn category_name(&self, id: i64) -> &str {
        self.category_names
            .get(&id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.state.selected().and_then(|i| self.filtered_transactions.get(i))
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.categories_state.selected().and_then(|i| self.categories.get(i))
    }

    pub fn apply_filter(&mut self, filter: FilterType) {
        self.active_filter = filter;

        self.filtered_transactions = self
            .transactions
            .iter()
            .filter(|tx| match filter {
                FilterType::None | FilterType::AllTransactions => true,
                FilterType::Income => tx.kind == TransactionType::Income,
                FilterType::Expense => tx.kind == TransactionType::Expense,
                FilterType::ByCategory(id) => tx.category_id == id,
            })
            .cloned()
            .collect();

        // Reset selection to first item
        if !self.filtered_transactions.is_empty() {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(FilterType::None);
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    /// Totals per category, in category order, plus one row for dangling ids
    pub fn category_summary(&self) -> Vec<CategorySummary> {
        let mut rows: Vec<CategorySummary> = self
            .categories
            .iter()
            .map(|c| CategorySummary {
                id: c.id,
                name: c.name.clone(),
                count: 0,
                income: 0.0,
                expense: 0.0,
            })
            .collect();
        let index: HashMap<i64, usize> = rows.iter().enumerate().map(|(i, r)| (r.id, i)).collect();
        let mut unknown: Option<CategorySummary> = None;

        for tx in &self.transactions {
            let row = match index.get(&tx.category_id) {
                Some(&i) => &mut rows[i],
                None => unknown.get_or_insert_with(|| CategorySummary {
                    id: tx.category_id,
                    name: UNKNOWN_CATEGORY.to_string(),
                    count: 0,
                    income: 0.0,
                    expense: 0.0,
                }),
            };
            row.count += 1;
            match tx.kind {
                TransactionType::Income => row.income += tx.amount,
                TransactionType::Expense => row.expense += tx.amount,
            }
        }

        rows.extend(unknown);
        rows
    }

    fn table_len(&self) -> usize {
        match self.current_page {
            Page::Categories => self.categories.len(),
            _ => self.filtered_transactions.len(),
        }
    }

    fn table_state(&mut self) -> &mut TableState {
        match self.current_page {
            Page::Categories => &mut self.categories_state,
            _ => &mut self.state,
        }
    }

    pub fn next(&mut self) {
        let len = self.table_len();
        if len == 0 {
            return;
        }
        let state = self.table_state();
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.table_len();
        if len == 0 {
            return;
        }
        let state = self.table_state();
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.table_len();
        if len == 0 {
            return;
        }
        let state = self.table_state();
        let i = state.selected().map(|i| (i + 20).min(len - 1)).unwrap_or(0);
        state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let state = self.table_state();
        let i = state.selected().map(|i| i.saturating_sub(20)).unwrap_or(0);
        state.select(Some(i));
    }

    pub fn stats(&self) -> TransactionStats {
        let mut stats = TransactionStats::default();

        for tx in &self.transactions {
            match tx.kind {
                TransactionType::Expense => {
                    stats.expense_count += 1;
                    stats.expense_total += tx.amount;
                }
                TransactionType::Income => {
                    stats.income_count += 1;
                    stats.income_total += tx.amount;
                }
            }
        }

        stats
    }
}

#[derive(Default)]
pub struct TransactionStats {
    pub expense_count: usize,
    pub expense_total: f64,
    pub income_count: usize,
    pub income_total: f64,
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter if app.current_page == Page::Categories => {
                    // Drill into the selected category's transactions
                    if let Some(id) = app.selected_category().map(|c| c.id) {
                        app.apply_filter(FilterType::ByCategory(id));
                        app.current_page = Page::Ledger;
                    }
                }
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => app.next_page(),
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Char('c') => {
                    app.clear_filter();
                    app.current_page = Page::Ledger;
                }
                KeyCode::Char('1') if app.current_page == Page::Views => {
                    app.apply_filter(FilterType::AllTransactions);
                    app.current_page = Page::Ledger;
                }
                KeyCode::Char('2') if app.current_page == Page::Views => {
                    app.apply_filter(FilterType::Income);
                    app.current_page = Page::Ledger;
                }
                KeyCode::Char('3') if app.current_page == Page::Views => {
                    app.apply_filter(FilterType::Expense);
                    app.current_page = Page::Ledger;
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.table_state().select(Some(0)),
                KeyCode::End => {
                    let len = app.table_len();
                    if len > 0 {
                        app.table_state().select(Some(len - 1));
                    }
                }
                KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail && app.current_page == Page::Ledger {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Categories => render_categories(f, chunks[1], app),
            Page::Ledger => render_table(f, chunks[1], app),
            Page::Views => render_views(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn kind_color(kind: TransactionType) -> Color {
    match kind {
        TransactionType::Income => Color::Green,
        TransactionType::Expense => Color::Red,
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();

    let pages = [
        (Page::Categories, "Categories"),
        (Page::Ledger, "Ledger"),
        (Page::Views, "Views"),
    ];

    let mut spans = vec![];
    for (i, (page, name)) in pages.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        spans.push(Span::styled(*name, style));
    }

    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("Balance: {}", format_money(app.balance)),
        Style::default().fg(if app.balance < 0.0 { Color::Red } else { Color::Green }),
    ));
    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("↑ {}", stats.income_count),
        Style::default().fg(Color::Green),
    ));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("↓ {}", stats.expense_count),
        Style::default().fg(Color::Red),
    ));

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    Row::new(cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1)
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let rows: Vec<Row> = app
        .filtered_transactions
        .iter()
        .map(|tx| {
            let color = kind_color(tx.kind);
            Row::new(vec![
                Cell::from(tx.id.to_string()),
                Cell::from(format_timestamp(&tx.date)),
                Cell::from(tx.kind.title()).style(Style::default().fg(color)),
                Cell::from(format!("{:.2}", tx.amount)).style(Style::default().fg(color)),
                Cell::from(truncate(app.category_name(tx.category_id), 20)),
                Cell::from(truncate(tx.description.as_deref().unwrap_or(""), 30)),
            ])
            .height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(20),
            Constraint::Length(9),
            Constraint::Length(12),
            Constraint::Length(22),
            Constraint::Min(10),
        ],
    )
    .header(header_row(&["ID", "Date", "Type", "Amount", "Category", "Description"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Transactions "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_categories(f: &mut Frame, area: Rect, app: &mut App) {
    let rows: Vec<Row> = app
        .category_summary()
        .into_iter()
        .map(|row| {
            let net = row.income - row.expense;
            Row::new(vec![
                Cell::from(row.id.to_string()),
                Cell::from(row.name),
                Cell::from(row.count.to_string()),
                Cell::from(format!("{:.2}", row.income)).style(Style::default().fg(Color::Green)),
                Cell::from(format!("{:.2}", row.expense)).style(Style::default().fg(Color::Red)),
                Cell::from(format!("{:.2}", net)),
            ])
            .height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(22),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(14),
        ],
    )
    .header(header_row(&["ID", "Category", "Txs", "Income", "Expense", "Net"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Categories - Enter shows transactions "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.categories_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (selected, total) = match app.current_page {
        Page::Categories => (app.categories_state.selected(), app.categories.len()),
        _ => (app.state.selected(), app.filtered_transactions.len()),
    };

    let mut spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected.map(|i| i + 1).unwrap_or(0), total),
        Style::default().fg(Color::Cyan),
    )];

    let filter_name = match app.active_filter {
        FilterType::None | FilterType::AllTransactions => None,
        FilterType::Income => Some("income".to_string()),
        FilterType::Expense => Some("expense".to_string()),
        FilterType::ByCategory(id) => Some(app.category_name(id).to_string()),
    };
    if let Some(name) = filter_name {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("Filter: {}", name),
            Style::default().fg(Color::Green),
        ));
        spans.push(Span::raw(" ("));
        spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" clear)"));
    }

    for (key, label) in [
        ("Enter", " Details | "),
        ("Tab", " Page | "),
        ("↑/↓", " Nav | "),
        ("PgUp/PgDn", " Fast | "),
    ] {
        if key == "Enter" {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(label));
    }
    spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn render_views(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();

    let marker = |filter: FilterType| {
        if app.active_filter == filter {
            Span::styled("→", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::raw(" ")
        }
    };

    let entry = |filter: FilterType, key: &'static str, label: &'static str, count: usize, color: Color| {
        Line::from(vec![
            Span::raw("  ║ "),
            marker(filter),
            Span::styled(key, Style::default().fg(Color::Yellow)),
            Span::raw(label),
            Span::styled(format!("{:>5} txs", count), Style::default().fg(color)),
            Span::raw("         ║"),
        ])
    };

    let hint = Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
    let hint_key = Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Quick Views & Filters",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  ╔══════════════════════════════════════════════════╗"),
        entry(
            FilterType::AllTransactions,
            "1",
            ". All Transactions          ",
            app.transactions.len(),
            Color::White,
        ),
        Line::from("  ╠══════════════════════════════════════════════════╣"),
        entry(
            FilterType::Income,
            "2",
            ". Income                    ",
            stats.income_count,
            Color::Green,
        ),
        entry(
            FilterType::Expense,
            "3",
            ". Expenses                  ",
            stats.expense_count,
            Color::Red,
        ),
        Line::from("  ╚══════════════════════════════════════════════════╝"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Totals: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("income {}", format_money(stats.income_total)),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  "),
            Span::styled(
                format!("expenses {}", format_money(stats.expense_total)),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Hint: ", hint_key),
            Span::styled("Press ", hint),
            Span::styled("1-3", hint_key),
            Span::styled(" to filter, ", hint),
            Span::styled("c", hint_key),
            Span::styled(" to clear", hint),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Views - Quick Access Filters "),
    );

    f.render_widget(paragraph, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Transaction Details ");

    let Some(tx) = app.selected_transaction() else {
        f.render_widget(Paragraph::new("No transaction selected").block(block), area);
        return;
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let color = kind_color(tx.kind);

    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled("  ID: ", label), Span::raw(tx.id.to_string())]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Date: ", label),
            Span::raw(format_timestamp(&tx.date)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Type: ", label),
            Span::styled(tx.kind.title(), Style::default().fg(color)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Amount: ", label),
            Span::styled(format_money(tx.signed_amount()), Style::default().fg(color)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Category: ", label),
            Span::raw(app.category_name(tx.category_id).to_string()),
        ]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(Span::styled(
            "  DESCRIPTION",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                wrap_text(tx.description.as_deref().unwrap_or("N/A"), 35),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to close",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn wrap_text(text: &str, width: usize) -> String {
    if text.len() <= width {
        return text.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_tracker::db::parse_timestamp;

    fn sample_app() -> App {
        let date = parse_timestamp("2024-06-01 10:00:00").unwrap();
        let tx = |id, amount, kind, category_id| Transaction {
            id,
            amount,
            kind,
            description: None,
            date,
            category_id,
        };

        App::new(
            vec![
                tx(1, 1000.0, TransactionType::Income, 1),
                tx(2, 200.0, TransactionType::Expense, 1),
                tx(3, 300.0, TransactionType::Expense, 2),
                tx(4, 15.0, TransactionType::Expense, 99),
            ],
            vec![
                Category { id: 1, name: "Food".to_string() },
                Category { id: 2, name: "Rent".to_string() },
            ],
            485.0,
        )
    }

    #[test]
    fn test_filters() {
        let mut app = sample_app();

        app.apply_filter(FilterType::Expense);
        assert_eq!(app.filtered_transactions.len(), 3);

        app.apply_filter(FilterType::ByCategory(2));
        assert_eq!(app.filtered_transactions.len(), 1);
        assert_eq!(app.selected_transaction().map(|t| t.id), Some(3));

        app.apply_filter(FilterType::ByCategory(42));
        assert!(app.selected_transaction().is_none());

        app.clear_filter();
        assert_eq!(app.filtered_transactions.len(), 4);
    }

    #[test]
    fn test_category_summary_includes_unknown() {
        let app = sample_app();
        let summary = app.category_summary();

        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].name, "Food");
        assert_eq!((summary[0].income, summary[0].expense), (1000.0, 200.0));
        assert_eq!(summary[2].name, UNKNOWN_CATEGORY);
        assert_eq!(summary[2].count, 1);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = sample_app();
        app.previous();
        assert_eq!(app.state.selected(), Some(3));
        app.next();
        assert_eq!(app.state.selected(), Some(0));

        app.next_page();
        assert_eq!(app.current_page, Page::Views);
        app.next_page();
        assert_eq!(app.current_page, Page::Categories);
        app.next();
        assert_eq!(app.categories_state.selected(), Some(1));
    }

    #[test]
    fn test_wrap_and_truncate() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("A very long description here", 10), "A very ...");
        assert_eq!(wrap_text("one two three", 7), "one two\n  three");
    }
}
