use crate::error::Result;
use crate::grid::Grid;
use serde_json::json;
use std::{
    collections::HashMap,
    fs::File,
    io::{BufWriter, Write},
};

pub fn create_replay_logger(
    filename: Option<String>,
    rows: usize,
    cols: usize,
) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(filename, rows, cols)),
    }
}

/// Records what happens during a run. Every method defaults to doing nothing.
///
/// Entries are keyed by `turn`, a counter owned by the caller that never goes back,
/// unlike the generation number which restarts whenever the grid is replaced.
/// Events logged with turn `n` happened before the grid recorded at turn `n`.
pub trait ReplayLogger {
    #[allow(unused_variables)]
    fn log_generation(&mut self, turn: usize, generation: usize, population: usize) {}

    #[allow(unused_variables)]
    fn log_event(&mut self, turn: usize, event: Event) {}

    #[allow(unused_variables)]
    fn log_end(&mut self, turn: usize, reason: String, grid: &Grid) {}

    fn save(&self) -> Result<()> {
        Ok(())
    }

    fn log_start(&mut self, turn: usize) {
        self.log_event(turn, Event::new(EventType::Start, None));
    }

    fn log_stop(&mut self, turn: usize) {
        self.log_event(turn, Event::new(EventType::Stop, None));
    }

    fn log_toggle(&mut self, turn: usize, location: (usize, usize)) {
        self.log_event(turn, Event::new(EventType::Toggle, Some(location)));
    }

    fn log_clear(&mut self, turn: usize) {
        self.log_event(turn, Event::new(EventType::Clear, None));
    }

    fn log_randomize(&mut self, turn: usize) {
        self.log_event(turn, Event::new(EventType::Randomize, None));
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum EventType {
    Start,
    Stop,
    Toggle,
    Clear,
    Randomize,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Event {
    event_type: EventType,
    location: Option<(usize, usize)>,
}

impl Event {
    fn new(event_type: EventType, location: Option<(usize, usize)>) -> Self {
        Event {
            event_type,
            location,
        }
    }
}

struct Generation {
    turn: usize,
    generation: usize,
    population: usize,
}

struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

struct JsonReplayLogger {
    filename: String,
    rows: usize,
    cols: usize,
    generations: Vec<Generation>,
    events: HashMap<usize, Vec<Event>>,
    end: Option<(usize, String, Grid)>,
}

impl JsonReplayLogger {
    pub fn new(filename: String, rows: usize, cols: usize) -> Self {
        JsonReplayLogger {
            filename,
            rows,
            cols,
            generations: Vec::new(),
            events: HashMap::new(),
            end: None,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        let generations: Vec<_> = self
            .generations
            .iter()
            .map(|generation| {
                json!({
                    "turn": generation.turn,
                    "generation": generation.generation,
                    "population": generation.population,
                    "events": self.events.get(&generation.turn).unwrap_or(&Vec::new()),
                })
            })
            .collect();

        // Events after the last recorded grid, such as the final stop
        let end = self.end.as_ref().map(|(turn, reason, grid)| {
            json!({
                "turn": turn,
                "reason": reason,
                "grid": grid,
                "events": self.events.get(turn).unwrap_or(&Vec::new()),
            })
        });

        json!({
            "grid": {
                "rows": self.rows,
                "cols": self.cols,
            },
            "generations": generations,
            "end": end,
        })
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_generation(&mut self, turn: usize, generation: usize, population: usize) {
        self.generations.push(Generation {
            turn,
            generation,
            population,
        });
    }

    fn log_event(&mut self, turn: usize, event: Event) {
        self.events.entry(turn).or_default().push(event);
    }

    fn log_end(&mut self, turn: usize, reason: String, grid: &Grid) {
        self.end = Some((turn, reason, grid.clone()));
    }

    fn save(&self) -> Result<()> {
        let file = File::create(&self.filename)?;
        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &self.to_json())?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::create_empty_grid;

    #[test]
    fn when_no_filename_is_given_saving_does_nothing() {
        let mut logger = create_replay_logger(None, 2, 2);
        logger.log_generation(0, 0, 0);

        assert!(logger.save().is_ok());
    }

    #[test]
    fn when_logging_generations_events_are_grouped_by_turn() {
        let mut logger = JsonReplayLogger::new("unused.json".to_string(), 3, 4);
        logger.log_toggle(0, (1, 2));
        logger.log_start(0);
        logger.log_generation(0, 0, 1);
        logger.log_generation(1, 1, 0);

        let json = logger.to_json();

        assert_eq!(json["grid"]["rows"], 3);
        assert_eq!(json["grid"]["cols"], 4);
        assert_eq!(json["generations"][0]["turn"], 0);
        assert_eq!(json["generations"][0]["population"], 1);
        assert_eq!(json["generations"][0]["events"][0]["event_type"], "Toggle");
        assert_eq!(json["generations"][0]["events"][0]["location"], json!([1, 2]));
        assert_eq!(json["generations"][0]["events"][1]["event_type"], "Start");
        assert_eq!(json["generations"][1]["events"], json!([]));
        assert!(json["end"].is_null());
    }

    #[test]
    fn when_the_generation_restarts_events_stay_with_their_own_turn() {
        let mut logger = JsonReplayLogger::new("unused.json".to_string(), 2, 2);
        logger.log_start(0);
        logger.log_generation(0, 0, 0);
        logger.log_generation(1, 1, 0);
        logger.log_stop(2);
        logger.log_clear(2);
        logger.log_start(2);
        logger.log_generation(2, 0, 0);

        let json = logger.to_json();

        assert_eq!(json["generations"][0]["events"], json!([{ "event_type": "Start", "location": null }]));
        assert_eq!(json["generations"][2]["generation"], 0);
        assert_eq!(json["generations"][2]["events"].as_array().unwrap().len(), 3);
        assert_eq!(json["generations"][2]["events"][1]["event_type"], "Clear");
    }

    #[test]
    fn when_logging_the_end_the_reason_final_grid_and_trailing_events_are_recorded() {
        let mut logger = JsonReplayLogger::new("unused.json".to_string(), 1, 2);
        logger.log_generation(0, 0, 0);
        logger.log_stop(1);
        logger.log_end(1, "Requested".to_string(), &create_empty_grid(1, 2));

        let json = logger.to_json();

        assert_eq!(json["end"]["turn"], 1);
        assert_eq!(json["end"]["reason"], "Requested");
        assert_eq!(json["end"]["grid"], json!([".."]));
        assert_eq!(json["end"]["events"][0]["event_type"], "Stop");
    }

    #[test]
    fn when_saving_the_replay_it_is_written_as_json() {
        let path = std::env::temp_dir().join("life_engine_replay_test.json");
        let mut logger = create_replay_logger(Some(path.to_string_lossy().into_owned()), 2, 2);
        logger.log_randomize(0);
        logger.log_generation(0, 0, 3);

        logger.save().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["generations"][0]["population"], 3);
        assert_eq!(json["generations"][0]["events"][0]["event_type"], "Randomize");
        std::fs::remove_file(path).unwrap();
    }
}
