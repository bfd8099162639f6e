use crate::{Effect, Msg, SessionPhase, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if state.phase() != SessionPhase::Idle {
                return (state, Vec::new());
            }
            state.start();
            begin_extraction(&mut state)
        }
        Msg::Scrolled => {
            if state.phase() != SessionPhase::Watching {
                return (state, Vec::new());
            }
            state.note_scroll();
            vec![Effect::RestartDebounce]
        }
        Msg::QuietPeriodElapsed => {
            if state.phase() != SessionPhase::Watching {
                return (state, Vec::new());
            }
            begin_extraction(&mut state)
        }
        Msg::ExtractionFinished { captured, total } => {
            let rerun = state.finish_extraction(captured, total);
            match state.phase() {
                SessionPhase::Watching if rerun => begin_extraction(&mut state),
                SessionPhase::Stopping => {
                    state.finish_stop();
                    vec![Effect::Shutdown]
                }
                _ => Vec::new(),
            }
        }
        Msg::ResultsRequested => vec![Effect::ReportResults],
        Msg::StopRequested => match state.phase() {
            SessionPhase::Stopping | SessionPhase::Stopped => Vec::new(),
            SessionPhase::Idle | SessionPhase::Watching => {
                // A queued rerun is dropped; the in-flight scan is allowed to finish.
                state.drop_rerun();
                if state.is_extracting() {
                    state.begin_stop();
                    vec![Effect::CancelDebounce]
                } else {
                    state.finish_stop();
                    vec![Effect::CancelDebounce, Effect::Shutdown]
                }
            }
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn begin_extraction(state: &mut SessionState) -> Vec<Effect> {
    if state.try_begin_extraction() {
        vec![Effect::RunExtraction]
    } else {
        Vec::new()
    }
}
