use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// What the loop hands its handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Input(Event),
    /// Time to advance animations and redraw; carries the time since the
    /// previous frame.
    Frame(Duration),
}

/// A centralized event loop that drives the window manager.
///
/// Every pass drains all pending input, then emits exactly one
/// [`LoopEvent::Frame`] so the manager updates and draws once per frame no
/// matter how many mouse events arrived in between.
pub struct EventLoop<D> {
    driver: D,
    frame_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, frame_interval: Duration) -> Self {
        Self {
            driver,
            frame_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Runs the loop on the current thread until the handler returns
    /// [`ControlFlow::Quit`].
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, LoopEvent) -> io::Result<ControlFlow>,
    {
        let mut last_frame = Instant::now();
        loop {
            if self.driver.poll(self.frame_interval)? {
                // Drain the queue so a burst of drag events folds into one
                // frame instead of lagging behind the pointer.
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, LoopEvent::Input(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
            let now = Instant::now();
            let dt = now.saturating_duration_since(last_frame);
            last_frame = now;
            if let ControlFlow::Quit = handler(&mut self.driver, LoopEvent::Frame(dt))? {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct Scripted {
        events: VecDeque<Event>,
    }

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.events
                .pop_front()
                .ok_or_else(|| io::Error::other("queue empty"))
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn burst_of_input_yields_one_frame() {
        let driver = Scripted {
            events: VecDeque::from(vec![key('a'), key('b'), key('c')]),
        };
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(0));
        let mut inputs = 0;
        let mut frames = 0;
        event_loop
            .run(|_, event| {
                match event {
                    LoopEvent::Input(_) => inputs += 1,
                    LoopEvent::Frame(_) => frames += 1,
                }
                Ok(if frames == 2 {
                    ControlFlow::Quit
                } else {
                    ControlFlow::Continue
                })
            })
            .unwrap();
        assert_eq!(inputs, 3);
        assert_eq!(frames, 2);
    }

    #[test]
    fn quit_from_input_stops_before_frame() {
        let driver = Scripted {
            events: VecDeque::from(vec![key('q'), key('x')]),
        };
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(0));
        let mut seen = Vec::new();
        event_loop
            .run(|_, event| {
                seen.push(event.clone());
                Ok(match event {
                    LoopEvent::Input(e) if e == key('q') => ControlFlow::Quit,
                    _ => ControlFlow::Continue,
                })
            })
            .unwrap();
        assert_eq!(seen, vec![LoopEvent::Input(key('q'))]);
        assert_eq!(event_loop.driver().events.len(), 1);
    }
}
