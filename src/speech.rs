use std::collections::VecDeque;

/// Non-speech sound effects. Fire-and-forget: never a precondition for
/// further logic, and implementations may ignore them entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Activate,
    Deny,
}

/// The speech output sink.
///
/// `speak` replaces whatever was queued or being spoken; there is no queue,
/// no history, no priority. Every navigation transition ends in exactly one
/// `speak` call, so the newest line is always the user's model of the
/// current state.
pub trait Announcer {
    fn speak(&mut self, line: &str);
    fn play_cue(&mut self, _cue: Cue) {}
}

/// Caption sink for the demo host: keeps the current line plus a short
/// backlog so the on-screen caption area can show recent announcements.
pub struct CaptionFeed {
    lines: VecDeque<String>,
    capacity: usize,
}

impl CaptionFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// Oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl Announcer for CaptionFeed {
    fn speak(&mut self, line: &str) {
        self.lines.push_back(line.to_string());
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }
}

/// Test double: records the full transcript while `current` keeps the
/// replace-semantics view a real speech sink would have.
#[derive(Default)]
pub struct RecordingAnnouncer {
    pub transcript: Vec<String>,
    pub cues: Vec<Cue>,
}

impl RecordingAnnouncer {
    pub fn current(&self) -> Option<&str> {
        self.transcript.last().map(String::as_str)
    }
}

impl Announcer for RecordingAnnouncer {
    fn speak(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn play_cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_feed_newest_wins() {
        let mut feed = CaptionFeed::new(3);
        feed.speak("first");
        feed.speak("second");
        assert_eq!(feed.current(), Some("second"));
    }

    #[test]
    fn test_caption_feed_drops_oldest() {
        let mut feed = CaptionFeed::new(2);
        feed.speak("a");
        feed.speak("b");
        feed.speak("c");
        let lines: Vec<&str> = feed.recent().collect();
        assert_eq!(lines, vec!["b", "c"]);
    }

    #[test]
    fn test_recorder_tracks_cues() {
        let mut rec = RecordingAnnouncer::default();
        rec.speak("hello");
        rec.play_cue(Cue::Deny);
        assert_eq!(rec.current(), Some("hello"));
        assert_eq!(rec.cues, vec![Cue::Deny]);
    }
}
