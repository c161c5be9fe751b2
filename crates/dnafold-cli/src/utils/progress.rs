use dnafold::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::fmt::Write as _;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(80);
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const BAR_TEMPLATE: &str = "{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})";
const DONE: &str = "✓ Done";

/// Draws workflow progress on stderr.
///
/// A phase shows as a spinner, a counted task as a bar. Genetic generations
/// have no known total, so they only rewrite the spinner message.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        bar.set_style(spinner());
        bar.finish_and_clear();
        Self { bar }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let handler = self.clone();
        Box::new(move |event: Progress| handler.handle(event))
    }

    fn handle(&self, event: Progress) {
        let bar = &self.bar;
        match event {
            Progress::PhaseStart { name } => {
                bar.reset();
                bar.set_length(0);
                bar.set_style(spinner());
                bar.set_message(name);
                bar.enable_steady_tick(TICK);
            }
            Progress::PhaseFinish => {
                bar.disable_steady_tick();
                bar.finish_with_message(DONE);
            }
            Progress::TaskStart { total_steps } => {
                bar.disable_steady_tick();
                bar.reset();
                bar.set_length(total_steps);
                bar.set_style(counter());
            }
            Progress::TaskIncrement => bar.inc(1),
            Progress::TaskFinish => {
                if let Some(total) = bar.length() {
                    bar.set_position(total);
                }
                bar.finish();
            }
            Progress::Generation {
                index,
                best_score,
                stagnation,
            } => bar.set_message(format!(
                "Generation {} | best {:.4} | stagnation {}",
                index, best_score, stagnation
            )),
            Progress::Message(text) if bar.is_finished() => bar.set_message(text),
            Progress::Message(text) => bar.println(format!("  {}", text)),
        }
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn counter() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
        })
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn new_handler_is_idle() {
        let handler = CliProgressHandler::new();
        assert_eq!(handler.bar.length(), Some(0));
        assert!(handler.bar.is_finished());
    }

    #[test]
    fn annealing_events_drive_a_counted_bar() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Simulated Annealing",
        });
        assert_eq!(handler.bar.message(), "Simulated Annealing");
        assert!(!handler.bar.is_finished());

        callback(Progress::TaskStart { total_steps: 50 });
        callback(Progress::TaskIncrement);
        assert_eq!(handler.bar.length(), Some(50));
        assert_eq!(handler.bar.position(), 1);

        callback(Progress::TaskFinish);
        assert!(handler.bar.is_finished());
        assert_eq!(handler.bar.position(), 50);

        callback(Progress::PhaseFinish);
        assert_eq!(handler.bar.message(), DONE);
    }

    #[test]
    fn generation_events_rewrite_the_message() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Genetic Search",
        });
        callback(Progress::Generation {
            index: 7,
            best_score: 12.5,
            stagnation: 3,
        });

        assert_eq!(
            handler.bar.message(),
            "Generation 7 | best 12.5000 | stagnation 3"
        );
    }

    #[test]
    fn messages_after_finish_replace_the_status() {
        let handler = CliProgressHandler::new();
        handler.get_callback()(Progress::Message("saved".to_string()));
        assert_eq!(handler.bar.message(), "saved");
    }

    #[test]
    fn callback_can_move_to_another_thread() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Survey" });
            callback(Progress::TaskIncrement);
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        assert!(handler.bar.is_finished());
        assert_eq!(handler.bar.message(), DONE);
    }
}
