//! Run assembly: merging a page's glyph events into text elements.

use crate::element::{AssemblerOptions, GlyphEvent, Rejection, TextElement, Transition};

/// The run being built.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RunState {
    #[default]
    Empty,
    Open(TextElement),
}

impl RunState {
    /// Feed one event. An empty state always accepts; an event without text
    /// leaves it empty.
    pub fn try_append(&mut self, event: &GlyphEvent, options: &AssemblerOptions) -> bool {
        match self {
            RunState::Empty => {
                if !event.text.is_empty() {
                    *self = RunState::Open(TextElement::from_event(event));
                }
                true
            }
            RunState::Open(element) => element.try_append(event, options),
        }
    }

    /// Close the run, leaving the state empty.
    pub fn take(&mut self) -> Option<TextElement> {
        match std::mem::take(self) {
            RunState::Empty => None,
            RunState::Open(element) => Some(element),
        }
    }
}

/// What happened to an event pushed into a [`RunAssembler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event opened the first run.
    Opened,
    /// The event extended the open run.
    Extended,
    /// The event was folded into the open run as super/subscript.
    Folded,
    /// The open run was closed and the event started a new one.
    Split(Rejection),
    /// The event carried no text.
    Skipped,
}

/// Builds a page's ordered element list from its event stream.
#[derive(Debug, Clone, Default)]
pub struct RunAssembler {
    options: AssemblerOptions,
    current: RunState,
    finished: Vec<TextElement>,
}

impl RunAssembler {
    pub fn new(options: AssemblerOptions) -> Self {
        Self {
            options,
            current: RunState::Empty,
            finished: Vec::new(),
        }
    }

    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    /// Feed the next event in content-stream order.
    pub fn push(&mut self, event: &GlyphEvent) -> Outcome {
        if event.text.is_empty() {
            return Outcome::Skipped;
        }
        let check = match &self.current {
            RunState::Empty => None,
            RunState::Open(element) => Some(element.check_append(event, &self.options)),
        };
        match check {
            None => {
                self.current = RunState::Open(TextElement::from_event(event));
                Outcome::Opened
            }
            Some(Ok(transition)) => {
                let outcome = match transition {
                    Transition::Open => Outcome::Opened,
                    Transition::Extend => Outcome::Extended,
                    Transition::Fold(_) => Outcome::Folded,
                };
                if let RunState::Open(element) = &mut self.current {
                    element.apply(event, transition);
                }
                outcome
            }
            Some(Err(reason)) => {
                if let Some(done) = self.current.take() {
                    self.finished.push(done);
                }
                self.current = RunState::Open(TextElement::from_event(event));
                Outcome::Split(reason)
            }
        }
    }

    /// Elements closed so far, not counting the open run.
    pub fn finished(&self) -> &[TextElement] {
        &self.finished
    }

    /// Close the open run and return all elements in creation order.
    pub fn finish(mut self) -> Vec<TextElement> {
        if let Some(done) = self.current.take() {
            self.finished.push(done);
        }
        self.finished
    }
}

/// Assemble a whole event stream.
pub fn assemble<'a, I>(events: I, options: &AssemblerOptions) -> Vec<TextElement>
where
    I: IntoIterator<Item = &'a GlyphEvent>,
{
    let mut assembler = RunAssembler::new(options.clone());
    for event in events {
        assembler.push(event);
    }
    assembler.finish()
}
