use manifest_sbom::prelude::*;
use std::sync::{Arc, Mutex};

/// One call recorded by `MockProgressReporter`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Info(String),
    Progress {
        current: usize,
        total: usize,
        file: Option<String>,
    },
    Error(String),
    Completed(String),
}

impl ProgressEvent {
    fn render(&self) -> String {
        match self {
            ProgressEvent::Info(message) => message.clone(),
            ProgressEvent::Progress {
                current,
                total,
                file: Some(file),
            } => format!("Progress: {}/{} - {}", current, total, file),
            ProgressEvent::Progress { current, total, .. } => {
                format!("Progress: {}/{}", current, total)
            }
            ProgressEvent::Error(message) => format!("Error: {}", message),
            ProgressEvent::Completed(message) => format!("Completed: {}", message),
        }
    }
}

/// Mock ProgressReporter recording every event of a scan
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    pub events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events rendered as single lines
    pub fn get_messages(&self) -> Vec<String> {
        self.events.lock().unwrap().iter().map(ProgressEvent::render).collect()
    }

    /// File names passed to `report_progress`, in call order
    pub fn progressed_files(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::Progress { file, .. } => file.clone(),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.record(ProgressEvent::Info(message.to_string()));
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.record(ProgressEvent::Progress {
            current,
            total,
            file: message.map(str::to_string),
        });
    }

    fn report_error(&self, message: &str) {
        self.record(ProgressEvent::Error(message.to_string()));
    }

    fn report_completion(&self, message: &str) {
        self.record(ProgressEvent::Completed(message.to_string()));
    }
}
