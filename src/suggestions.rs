//! Debounced input pipeline feeding the suggestion fetch.
//!
//! Values pushed in quick succession are collapsed: a value is emitted only after the
//! input has been quiet for the configured period, and only if it differs from the
//! previously emitted value. What happens on emission is up to the caller.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::debug;

#[derive(Debug)]
enum Signal {
    Input(String),
    Reset,
}

/// Handle to a running debounce task. Dropping it stops the task; values still
/// waiting for their quiet period are discarded.
#[derive(Debug)]
pub struct SuggestionPipeline {
    input: mpsc::UnboundedSender<Signal>,
    task: JoinHandle<()>,
}

impl SuggestionPipeline {
    /// Start the debounce task on the current tokio runtime.
    pub fn spawn<F>(quiet: Duration, on_emit: F) -> Self
    where
        F: FnMut(String) + Send + 'static,
    {
        let (input, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(debounce_distinct(rx, quiet, on_emit));
        Self { input, task }
    }

    /// Feed the latest input value.
    pub fn push(&self, text: impl Into<String>) {
        // Only fails once the task is gone, i.e. during teardown.
        let _ = self.input.send(Signal::Input(text.into()));
    }

    /// Drop any value still waiting for its quiet period and forget the last
    /// emitted one, so the next input is emitted even if it repeats it.
    pub fn reset(&self) {
        let _ = self.input.send(Signal::Reset);
    }
}

impl Drop for SuggestionPipeline {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn debounce_distinct<F>(
    mut rx: mpsc::UnboundedReceiver<Signal>,
    quiet: Duration,
    mut on_emit: F,
) where
    F: FnMut(String),
{
    let mut last_emitted: Option<String> = None;
    let mut pending: Option<String> = None;

    loop {
        let signal = if pending.is_none() {
            rx.recv().await
        } else {
            match timeout(quiet, rx.recv()).await {
                Ok(signal) => signal,
                Err(_) => {
                    // Input went quiet.
                    let Some(text) = pending.take() else {
                        continue;
                    };
                    if last_emitted.as_deref() == Some(text.as_str()) {
                        debug!("Suggestion input unchanged, skipping");
                        continue;
                    }
                    last_emitted = Some(text.clone());
                    on_emit(text);
                    continue;
                }
            }
        };

        match signal {
            Some(Signal::Input(text)) => pending = Some(text),
            Some(Signal::Reset) => {
                pending = None;
                last_emitted = None;
            }
            None => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::sleep;

    fn recording_pipeline(quiet: Duration) -> (SuggestionPipeline, Arc<Mutex<Vec<String>>>) {
        let emitted = Arc::new(Mutex::new(Vec::new()));
        let sink = emitted.clone();
        let pipeline = SuggestionPipeline::spawn(quiet, move |text| {
            sink.lock().unwrap().push(text);
        });
        (pipeline, emitted)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_only_last_value() {
        let (pipeline, emitted) = recording_pipeline(Duration::from_millis(500));

        for text in ["h", "he", "hel", "hell", "hello"] {
            pipeline.push(text);
            sleep(Duration::from_millis(100)).await;
        }
        sleep(Duration::from_millis(600)).await;

        assert_eq!(*emitted.lock().unwrap(), vec!["hello".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_emitted_before_quiet_period() {
        let (pipeline, emitted) = recording_pipeline(Duration::from_millis(500));

        pipeline.push("hola");
        sleep(Duration::from_millis(400)).await;
        assert!(emitted.lock().unwrap().is_empty());

        sleep(Duration::from_millis(200)).await;
        assert_eq!(emitted.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_value_is_suppressed() {
        let (pipeline, emitted) = recording_pipeline(Duration::from_millis(500));

        pipeline.push("hello");
        sleep(Duration::from_millis(600)).await;

        // Edited and restored within the quiet period: same value as last emission.
        pipeline.push("hello!");
        sleep(Duration::from_millis(100)).await;
        pipeline.push("hello");
        sleep(Duration::from_millis(600)).await;

        assert_eq!(*emitted.lock().unwrap(), vec!["hello".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_values_after_quiet_periods_all_emit() {
        let (pipeline, emitted) = recording_pipeline(Duration::from_millis(500));

        pipeline.push("one");
        sleep(Duration::from_millis(600)).await;
        pipeline.push("two");
        sleep(Duration::from_millis(600)).await;
        pipeline.push("one");
        sleep(Duration::from_millis(600)).await;

        assert_eq!(
            *emitted.lock().unwrap(),
            vec!["one".to_string(), "two".to_string(), "one".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_value_is_emitted() {
        let (pipeline, emitted) = recording_pipeline(Duration::from_millis(500));

        pipeline.push("abc");
        sleep(Duration::from_millis(600)).await;
        pipeline.push("");
        sleep(Duration::from_millis(600)).await;

        assert_eq!(
            *emitted.lock().unwrap(),
            vec!["abc".to_string(), String::new()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_discards_pending_value() {
        let (pipeline, emitted) = recording_pipeline(Duration::from_millis(500));

        pipeline.push("pending");
        sleep(Duration::from_millis(100)).await;
        drop(pipeline);
        sleep(Duration::from_millis(1000)).await;

        assert!(emitted.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_drops_pending_value() {
        let (pipeline, emitted) = recording_pipeline(Duration::from_millis(500));

        pipeline.push("casa");
        sleep(Duration::from_millis(100)).await;
        pipeline.reset();
        sleep(Duration::from_millis(1000)).await;

        assert!(emitted.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_allows_repeating_last_value() {
        let (pipeline, emitted) = recording_pipeline(Duration::from_millis(500));

        pipeline.push("casa");
        sleep(Duration::from_millis(600)).await;
        pipeline.reset();
        pipeline.push("casa");
        sleep(Duration::from_millis(600)).await;

        assert_eq!(
            *emitted.lock().unwrap(),
            vec!["casa".to_string(), "casa".to_string()]
        );
    }
}
