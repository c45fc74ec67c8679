use clap::Parser;
use iced::{
    mouse,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, text, Column, Container,
    },
    Color, Element, Length, Point, Rectangle, Renderer, Task, Theme,
};
use log::info;
use plot::{PlotModel, PlotSeries, AMPLITUDE_LIMIT};
use std::path::PathBuf;
use wavecore::SampleRate;

mod plot;

#[derive(Parser)]
#[command(author, version, about = "Visualize an audio CSV file as a waveform")]
struct Args {
    /// Path to the CSV file containing audio data
    csv_path: PathBuf,
    /// Factor to downsample the audio data
    #[arg(long, default_value_t = 10)]
    downsample: usize,
    /// Sample rate used to build the time axis
    #[arg(long, default_value_t = 44_100)]
    sample_rate: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let sample_rate = SampleRate::new(args.sample_rate)?;
    let model = PlotModel::load(&args.csv_path, args.downsample, sample_rate)?;
    info!("Headers: {:?}", model.headers);

    let title = format!("Waveform - {}", args.csv_path.display());
    iced::application(
        move || Visualizer::boot(model.clone()),
        Visualizer::update,
        Visualizer::view,
    )
    .title(move |_: &Visualizer| title.clone())
    .theme(application_theme)
    .run()
    .map_err(|err| anyhow::anyhow!("running visualizer window: {err}"))
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Visualizer {
    model: PlotModel,
    show_grid: bool,
}

#[derive(Debug, Clone)]
enum Message {
    ToggleGrid,
}

impl Visualizer {
    fn boot(model: PlotModel) -> (Self, Task<Message>) {
        (
            Visualizer {
                model,
                show_grid: true,
            },
            Task::none(),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::ToggleGrid => {
                state.show_grid = !state.show_grid;
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let plots = state.model.series.iter().enumerate().fold(
            Column::new().spacing(12),
            |col, (index, series)| {
                let canvas = Canvas::new(WaveformPlot {
                    series: series.clone(),
                    show_grid: state.show_grid,
                    color: series_color(index),
                })
                .width(Length::Fill)
                .height(Length::Fill);

                col.push(
                    column![
                        text(series.label.clone()).size(18),
                        canvas,
                        text(format!(
                            "Time (seconds): 0.000 - {:.4}   Amplitude: [-{AMPLITUDE_LIMIT}, {AMPLITUDE_LIMIT}]",
                            series.duration()
                        ))
                        .size(12),
                    ]
                    .spacing(4)
                    .height(Length::Fill),
                )
            },
        );

        let grid_label = if state.show_grid { "Hide grid" } else { "Show grid" };
        let layout = column![
            text(format!("Columns: {}", state.model.headers.join(", "))).size(14),
            button(grid_label).on_press(Message::ToggleGrid).padding(6),
            plots.height(Length::Fill),
        ]
        .spacing(10)
        .padding(16);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn series_color(index: usize) -> Color {
    if index == 0 {
        Color::from_rgb(0.18, 0.72, 0.89)
    } else {
        Color::from_rgb(0.95, 0.55, 0.2)
    }
}

#[derive(Clone)]
struct WaveformPlot {
    series: PlotSeries,
    show_grid: bool,
    color: Color,
}

impl canvas::Program<Message> for WaveformPlot {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        if self.show_grid {
            let grid = Path::new(|builder| {
                for level in [-0.5_f32, 0.0, 0.5] {
                    let y = bounds.height / 2.0 - level * (bounds.height / 2.0);
                    builder.move_to(Point::new(0.0, y));
                    builder.line_to(Point::new(bounds.width, y));
                }
            });
            frame.stroke(
                &grid,
                Stroke::default()
                    .with_width(1.0)
                    .with_color(Color::from_rgba(0.6, 0.6, 0.6, 0.5)),
            );
        }

        let points = self.series.canvas_points(bounds.width, bounds.height);
        if points.len() > 1 {
            let path = Path::new(|builder| {
                for (i, &(x, y)) in points.iter().enumerate() {
                    if i == 0 {
                        builder.move_to(Point::new(x, y));
                    } else {
                        builder.line_to(Point::new(x, y));
                    }
                }
            });

            frame.stroke(
                &path,
                Stroke::default()
                    .with_width(1.5)
                    .with_color(Color {
                        a: 0.7,
                        ..self.color
                    }),
            );
        }

        vec![frame.into_geometry()]
    }
}
