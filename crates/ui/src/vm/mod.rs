mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{
    OptionVm, QuizIntent, QuizScreenVm, QuizVm, SELECT_PROMPT, difficulty_label, feedback_text,
    map_quiz_screen, question_heading,
};
pub use time_fmt::format_elapsed;
