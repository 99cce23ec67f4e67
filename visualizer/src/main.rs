mod chart;

use anyhow::Context;
use chart::SentimentChart;
use clap::Parser;
use iced::{
    widget::{button, canvas::Canvas, column, row, scrollable, text, text_input, Column, Container},
    Alignment, Color, Element, Length, Task, Theme,
};
use sentimentcore::snapshot::{abbreviate_count, DisplayTotals};
use sentimentcore::{
    Category, ChartSeries, Dashboard, DashboardConfig, DashboardEvent, HttpSentimentSource,
    SentimentSource,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;

const HISTORY_LIMIT: usize = 20;

#[derive(Parser, Debug)]
#[command(author, version, about = "Live sentiment dashboard")]
struct Args {
    /// YAML dashboard configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend root URL, overrides the configuration file
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading dashboard config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    config.validate()?;
    log::info!("[visualizer] polling {}", config.base_url);

    let source = Arc::new(HttpSentimentSource::new(&config).context("building HTTP client")?);

    iced::application(
        move || Visualizer::boot(config.clone(), source.clone()),
        Visualizer::update,
        Visualizer::view,
    )
    .title(application_title)
    .theme(application_theme)
    .run()?;
    Ok(())
}

fn application_title(_: &Visualizer) -> String {
    "Sentiment Pulse".into()
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

struct Visualizer {
    source: Arc<HttpSentimentSource>,
    cancel: CancellationToken,
    chart: Vec<ChartSeries>,
    totals: DisplayTotals,
    tables: BTreeMap<Category, Vec<String>>,
    sentence: String,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Dashboard(DashboardEvent),
    DashboardStopped,
    SentenceChanged(String),
    SubmitSentence,
    SentenceInjected(Result<String, String>),
}

impl Visualizer {
    fn boot(config: DashboardConfig, source: Arc<HttpSentimentSource>) -> (Self, Task<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let dashboard = Dashboard::new(config, source.clone(), Arc::new(tx));
        let tasks = Task::batch([
            Task::perform(dashboard.run(cancel.clone()), |_| Message::DashboardStopped),
            Task::run(UnboundedReceiverStream::new(rx), Message::Dashboard),
        ]);
        (
            Visualizer {
                source,
                cancel,
                chart: Vec::new(),
                totals: DisplayTotals::default(),
                tables: BTreeMap::new(),
                sentence: String::new(),
                status: "Waiting for the backend...".into(),
                history: Vec::new(),
            },
            tasks,
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Dashboard(DashboardEvent::Chart(series)) => {
                state.chart = series;
                Task::none()
            }
            Message::Dashboard(DashboardEvent::Totals(totals)) => {
                if state.totals.all == 0 && totals.all > 0 {
                    state.status = "Receiving sentiment data".into();
                }
                state.totals = totals;
                Task::none()
            }
            Message::Dashboard(DashboardEvent::Table(table)) => {
                state.tables.insert(table.category, table.items);
                Task::none()
            }
            Message::DashboardStopped => {
                state.status = "Refresh stopped".into();
                state.push_history("Refresh loops stopped".into());
                Task::none()
            }
            Message::SentenceChanged(value) => {
                state.sentence = value;
                Task::none()
            }
            Message::SubmitSentence => {
                if state.sentence.trim().is_empty() {
                    state.status = "Nothing to inject".into();
                    return Task::none();
                }
                let text = std::mem::take(&mut state.sentence);
                let source = state.source.clone();
                Task::perform(
                    async move {
                        source
                            .inject(&text)
                            .await
                            .map(|_| text)
                            .map_err(|err| err.to_string())
                    },
                    Message::SentenceInjected,
                )
            }
            Message::SentenceInjected(Ok(text)) => {
                state.status = "Sentence injected".into();
                state.push_history(format!("Injected: {text}"));
                Task::none()
            }
            Message::SentenceInjected(Err(err)) => {
                log::warn!("[visualizer] inject failed: {err}");
                state.status = format!("Inject error: {err}");
                state.push_history("Inject failed".into());
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let inject_column = column![
            text("Inject text").size(26),
            text_input("Type a sentence", &state.sentence)
                .on_input(Message::SentenceChanged)
                .on_submit(Message::SubmitSentence)
                .padding(6),
            button("Submit")
                .on_press(Message::SubmitSentence)
                .padding(10),
            text(&state.status).size(14),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(240.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(320.0));

        let chart = Canvas::new(SentimentChart {
            series: state.chart.clone(),
        })
        .width(Length::Fill)
        .height(Length::Fixed(300.0));

        let tables = Category::ALL.iter().fold(row![].spacing(16), |tables, category| {
            tables.push(table_column(*category, state.tables.get(category)))
        });

        let dashboard_column = column![
            text("Sentiment per second").size(26),
            chart,
            totals_row(&state.totals),
            text("Recent sentences").size(18),
            tables,
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![inject_column, dashboard_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn category_color(category: Category) -> Color {
    let (r, g, b) = category.color();
    Color::from_rgb8(r, g, b)
}

fn totals_row(totals: &DisplayTotals) -> Element<'static, Message> {
    let cell = |label: &str, count: u64, color: Color| {
        column![
            text(label.to_string()).size(14).color(color),
            text(abbreviate_count(count)).size(22),
        ]
        .spacing(2)
        .width(Length::FillPortion(1))
    };
    row![
        cell("All", totals.all, Color::WHITE),
        cell(
            Category::Positive.label(),
            totals.positive,
            category_color(Category::Positive)
        ),
        cell(
            Category::Negative.label(),
            totals.negative,
            category_color(Category::Negative)
        ),
        cell(
            Category::Neutral.label(),
            totals.neutral,
            category_color(Category::Neutral)
        ),
    ]
    .spacing(12)
    .into()
}

fn table_column(category: Category, items: Option<&Vec<String>>) -> Element<'static, Message> {
    let entries = match items {
        Some(items) if !items.is_empty() => items
            .iter()
            .fold(Column::new().spacing(4), |col, item| {
                col.push(text(item.clone()).size(12))
            }),
        _ => Column::new().push(text("Nothing yet").size(12)),
    };
    column![
        text(category.label()).size(16).color(category_color(category)),
        Container::new(scrollable(entries).height(Length::Fixed(200.0))).padding(6),
    ]
    .spacing(6)
    .width(Length::FillPortion(1))
    .into()
}
