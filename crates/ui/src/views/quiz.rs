use dioxus::prelude::*;
use tracing::error;

use quiz_core::model::Choice;
use services::QuizPhase;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{OptionVm, QuizIntent, QuizScreenVm, QuizVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let error = use_signal(|| None::<ViewError>);
    let vm = {
        let quiz_loop = quiz_loop.clone();
        use_signal(move || match quiz_loop.start_session() {
            Ok(session) => Some(QuizVm::new(session)),
            Err(err) => {
                error!(%err, "failed to start quiz session");
                None
            }
        })
    };

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let mut error = error;
        let mut guard = vm.write();
        let Some(current) = guard.as_mut() else {
            error.set(Some(ViewError::Unknown));
            return;
        };
        match current.dispatch(intent, &quiz_loop) {
            Ok(()) => error.set(None),
            Err(err) => error.set(Some(err)),
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let phase = vm.read().as_ref().map(|vm| vm.session().phase());
        match (evt.data.key(), phase) {
            (Key::Character(value), Some(QuizPhase::AwaitingSelection)) => {
                let choice = value.parse::<u8>().ok().and_then(|n| Choice::new(n).ok());
                if let Some(choice) = choice {
                    evt.prevent_default();
                    dispatch_intent.call(QuizIntent::Select(choice));
                }
            }
            (Key::Enter, Some(QuizPhase::AwaitingSelection)) => {
                evt.prevent_default();
                dispatch_intent.call(QuizIntent::Submit);
            }
            (Key::Enter, Some(QuizPhase::Answered)) => {
                evt.prevent_default();
                dispatch_intent.call(QuizIntent::Next);
            }
            _ => {}
        }
    });

    let screen = vm.read().as_ref().map(QuizVm::screen);

    rsx! {
        div { class: "quiz", tabindex: "0", onkeydown: move |evt| on_key.call(evt),
            h1 { class: "quiz__title", "Quiz Game" }
            if let Some(err) = error() {
                p { class: "quiz__error", "{err.message()}" }
            }
            match screen {
                Some(screen) => rsx! {
                    QuizScreen { screen, on_intent: dispatch_intent }
                },
                None => rsx! {
                    p { class: "quiz__error", "{ViewError::Unknown.message()}" }
                },
            }
        }
    }
}

#[component]
fn QuizScreen(screen: QuizScreenVm, on_intent: EventHandler<QuizIntent>) -> Element {
    if let Some(final_score) = screen.final_score.clone() {
        return rsx! {
            div { class: "quiz-complete",
                h2 { class: "quiz-complete__score", "{final_score}" }
                if let Some(elapsed) = screen.elapsed.clone() {
                    p { class: "quiz-complete__time", "Time taken: {elapsed}" }
                }
                button {
                    class: "quiz__button quiz__button--restart",
                    id: "quiz-restart",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Restart),
                    "Restart Quiz"
                }
            }
        };
    }

    let answered = screen.phase == QuizPhase::Answered;
    let feedback = screen.feedback.clone().map(|(correct, text)| {
        let class = if correct {
            "quiz-feedback quiz-feedback--correct"
        } else {
            "quiz-feedback quiz-feedback--wrong"
        };
        (class, text)
    });

    rsx! {
        div { class: "quiz-question",
            if let Some(heading) = screen.heading.clone() {
                h2 { class: "quiz-question__prompt", "{heading}" }
            }
            if let Some(label) = screen.difficulty_label.clone() {
                p { class: "quiz-question__difficulty", "{label}" }
            }
            div { class: "quiz-options",
                for option in screen.options.clone() {
                    OptionButton { key: "{option.choice}", option, on_intent }
                }
            }
            if let Some((class, text)) = feedback {
                p { class: "{class}", "{text}" }
            }
            if let Some(warning) = screen.warning {
                p { class: "quiz-warning", "{warning}" }
            }
            div { class: "quiz-actions",
                if answered {
                    button {
                        class: "quiz__button quiz__button--next",
                        id: "quiz-next",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Next),
                        "Next"
                    }
                } else {
                    button {
                        class: "quiz__button quiz__button--submit",
                        id: "quiz-submit",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Submit),
                        "Submit Answer"
                    }
                }
            }
            progress {
                class: "quiz-progress",
                max: "1",
                value: "{screen.progress}",
            }
            p { class: "quiz-progress__label", "{screen.progress_label}" }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let mut class = String::from("quiz-option");
    if option.selected {
        class.push_str(" quiz-option--selected");
    }
    match option.verdict {
        Some(true) => class.push_str(" quiz-option--correct"),
        Some(false) => class.push_str(" quiz-option--wrong"),
        None => {}
    }
    let choice = option.choice;

    rsx! {
        button {
            class: "{class}",
            id: "quiz-option-{choice}",
            r#type: "button",
            disabled: option.disabled,
            onclick: move |_| on_intent.call(QuizIntent::Select(choice)),
            span { class: "quiz-option__number", "{choice}" }
            span { class: "quiz-option__text", "{option.text}" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}
