use quiz_core::model::{Choice, Difficulty, Question, QuestionId};

use super::test_harness::setup_view_harness;
use crate::vm::{QuizIntent, SELECT_PROMPT};

fn single_easy_question() -> Vec<Question> {
    vec![
        Question::new(
            QuestionId::new(1),
            "What is 2 + 2?",
            ["3".into(), "4".into(), "5".into(), "22".into()],
            Choice::new(2).unwrap(),
            Difficulty::Easy,
        )
        .unwrap(),
    ]
}

#[test]
fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(single_easy_question(), 1);
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Q1: What is 2 + 2?"), "missing heading in {html}");
    assert!(html.contains("Difficulty: easy"), "missing difficulty in {html}");
    assert!(html.contains("Submit Answer"), "missing submit in {html}");
    assert!(html.contains("0 / 1"), "missing progress in {html}");
}

#[test]
fn quiz_view_smoke_empty_dataset_completes_immediately() {
    let mut harness = setup_view_harness(Vec::new(), 5);
    harness.rebuild();

    let html = harness.render();
    assert!(
        html.contains("Quiz Completed! Your score: 0 / 5"),
        "missing final score in {html}"
    );
    assert!(html.contains("Restart Quiz"), "missing restart in {html}");
}

#[test]
fn quiz_view_smoke_warns_when_submitting_without_selection() {
    let mut harness = setup_view_harness(single_easy_question(), 1);
    harness.rebuild();

    harness.send(QuizIntent::Submit);

    let html = harness.render();
    assert!(html.contains(SELECT_PROMPT), "missing warning in {html}");
    assert!(html.contains("Q1: What is 2 + 2?"), "question changed in {html}");
}

#[test]
fn quiz_view_smoke_answer_next_and_restart() {
    let mut harness = setup_view_harness(single_easy_question(), 1);
    harness.rebuild();

    harness.send(QuizIntent::Select(Choice::new(1).unwrap()));
    harness.send(QuizIntent::Submit);
    let html = harness.render();
    assert!(html.contains("Wrong! Correct answer: 4"), "missing feedback in {html}");
    assert!(html.contains("Next"), "missing next in {html}");

    harness.send(QuizIntent::Next);
    let html = harness.render();
    assert!(
        html.contains("Quiz Completed! Your score: 0 / 1"),
        "missing final score in {html}"
    );

    harness.send(QuizIntent::Restart);
    let html = harness.render();
    assert!(html.contains("Q1: What is 2 + 2?"), "restart did not reload in {html}");
}
