//! Progress text shown while a video job is being polled.
//!
//! The flavor list is cosmetic; what matters is that message `i` is
//! `VIDEO_FLAVOR_MESSAGES[i % len]` followed by `(Status check i/max)`.

/// Shown by the shell right before the job is submitted.
pub const INITIATING_MESSAGE: &str = "Initiating video generation...";

/// Emitted once the job reports done, before the final asset is fetched.
pub const DOWNLOADING_MESSAGE: &str = "Downloading final asset...";

/// Rotating flavor text, indexed by poll iteration.
pub const VIDEO_FLAVOR_MESSAGES: &[&str] = &[
    "Assembling the Avengers of pixels...",
    "Calibrating the Quinjet cameras...",
    "Consulting the Sorcerer Supreme on frame timing...",
    "Charging the Arc Reactor render farm...",
    "Scanning the multiverse for the perfect take...",
    "Stark Industries servers crunching frames...",
    "Waiting for Thor to finish the thunder cue...",
];

/// Build the progress message for poll `iteration` out of `max_polls`.
pub fn progress_message(iteration: u32, max_polls: u32) -> String {
    let flavor = VIDEO_FLAVOR_MESSAGES[iteration as usize % VIDEO_FLAVOR_MESSAGES.len()];
    format!("{flavor} (Status check {iteration}/{max_polls})")
}
