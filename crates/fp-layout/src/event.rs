// ABOUTME: Events delivered by the host loop and deferred follow-up commands.
// ABOUTME: Commands are batched closures the host runs after each dispatch.

use std::fmt;

/// Input delivered to a layout and its panes by the host event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The surface changed size; intercepted by layouts, never forwarded
    Resize { width: u16, height: u16 },
    Key(char),
    Paste(String),
    Focus(bool),
}

/// Deferred work producing an optional follow-up event
pub type Command = Box<dyn FnOnce() -> Option<Event>>;

/// An ordered, possibly empty batch of commands
#[derive(Default)]
pub struct Commands(Vec<Command>);

impl Commands {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn single<F>(f: F) -> Self
    where
        F: FnOnce() -> Option<Event> + 'static,
    {
        let cmd: Command = Box::new(f);
        Self(vec![cmd])
    }

    /// A command that yields `event` when run
    pub fn emit(event: Event) -> Self {
        Self::single(move || Some(event))
    }

    pub fn push<F>(&mut self, f: F)
    where
        F: FnOnce() -> Option<Event> + 'static,
    {
        self.0.push(Box::new(f));
    }

    /// Append another batch, preserving order
    pub fn extend(&mut self, other: Commands) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Run every command in order and collect the events they produce
    pub fn run(self) -> Vec<Event> {
        self.0.into_iter().filter_map(|cmd| cmd()).collect()
    }
}

impl FromIterator<Commands> for Commands {
    fn from_iter<I: IntoIterator<Item = Commands>>(iter: I) -> Self {
        let mut batch = Commands::none();
        for cmds in iter {
            batch.extend(cmds);
        }
        batch
    }
}

impl fmt::Debug for Commands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Commands").field(&self.0.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_runs_in_order() {
        let mut first = Commands::emit(Event::Key('a'));
        first.push(|| None);
        let second = Commands::emit(Event::Key('b'));

        let batch: Commands = [first, Commands::none(), second].into_iter().collect();

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.run(), vec![Event::Key('a'), Event::Key('b')]);
    }

    #[test]
    fn empty_batch() {
        let batch = Commands::none();
        assert!(batch.is_empty());
        assert!(batch.run().is_empty());
    }
}
