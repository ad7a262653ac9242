//! Trunk binary: boots the PastPerfect web app.

fn main() {
    pastperfect_frontend::start();
}
