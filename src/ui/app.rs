use crate::advisor::{proposals_for, Adjustment};
use crate::engine::evaluate;
use crate::error::ValidationError;
use crate::model::{EvaluationResult, ProjectInputs, UnitsMode};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};

/// Undo depth kept by the dashboard.
const HISTORY_LIMIT: usize = 50;

pub struct App {
    pub inputs: ProjectInputs,
    pub result: std::result::Result<EvaluationResult, ValidationError>,
    /// Inputs before each applied change, newest last, at most
    /// `HISTORY_LIMIT` entries.
    pub history: Vec<ProjectInputs>,
    pub selected_proposal: usize,
    pub message: Option<String>,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(inputs: ProjectInputs) -> Self {
        let result = evaluate(&inputs);
        Self {
            inputs,
            result,
            history: Vec::new(),
            selected_proposal: 0,
            message: None,
            should_quit: false,
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        super::dashboard::draw_dashboard(frame, self);
    }

    fn handle_events(&mut self) -> Result<()> {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key.code);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') => self.cycle_scenario(),
            KeyCode::Char('m') => self.toggle_units_mode(),
            KeyCode::Char('u') | KeyCode::Backspace => self.undo(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_proposal(),
            KeyCode::Down | KeyCode::Char('j') => self.next_proposal(),
            KeyCode::Enter => self.apply_selected(),
            _ => {}
        }
    }

    /// Levers for the current status. Empty when compliant or invalid.
    #[must_use]
    pub fn proposals(&self) -> &'static [Adjustment] {
        match &self.result {
            Ok(r) => proposals_for(r.status),
            Err(_) => &[],
        }
    }

    fn replace_inputs(&mut self, next: ProjectInputs) {
        let previous = std::mem::replace(&mut self.inputs, next);
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(previous);
        self.result = evaluate(&self.inputs);
        self.selected_proposal = 0;
    }

    fn cycle_scenario(&mut self) {
        let mut next = self.inputs.clone();
        next.scenario = next.scenario.next();
        self.message = Some(format!("Parking scenario: {}", next.scenario));
        self.replace_inputs(next);
    }

    fn toggle_units_mode(&mut self) {
        let mut next = self.inputs.clone();
        next.program.mode = next.program.mode.toggled();
        if next.program.mode == UnitsMode::Manual {
            // Seed the manual count with what the user is looking at.
            if let Ok(r) = &self.result {
                next.program.manual_unit_count = Some(r.units.count);
            }
        }
        self.message = Some(format!("Units mode: {}", next.program.mode));
        self.replace_inputs(next);
    }

    fn apply_selected(&mut self) {
        let Ok(result) = &self.result else {
            return;
        };
        let Some(&adjustment) = self.proposals().get(self.selected_proposal) else {
            return;
        };
        let next = adjustment.apply(&self.inputs, result);
        self.message = Some(format!("Applied: {adjustment}"));
        self.replace_inputs(next);
    }

    fn undo(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.inputs = previous;
            self.result = evaluate(&self.inputs);
            self.selected_proposal = 0;
            self.message = Some("Reverted last change".to_string());
        }
    }

    fn previous_proposal(&mut self) {
        if self.selected_proposal > 0 {
            self.selected_proposal -= 1;
        }
    }

    fn next_proposal(&mut self) {
        if self.selected_proposal < self.proposals().len().saturating_sub(1) {
            self.selected_proposal += 1;
        }
    }
}
