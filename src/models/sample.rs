//! 内置示例测验，测验目录为空时使用

use super::question::{Question, QuestionKind, QuizDefinition};

pub fn sample_quiz() -> QuizDefinition {
    QuizDefinition {
        id: "1".to_string(),
        title: "JavaScript ES6 Features".to_string(),
        description: "Test your knowledge of modern JavaScript syntax and features".to_string(),
        questions: vec![
            Question {
                id: "1".to_string(),
                kind: QuestionKind::SingleSelect,
                prompt: "Which of the following is the correct syntax for arrow functions in ES6?"
                    .to_string(),
                options: Some(vec![
                    "function() => { return value; }".to_string(),
                    "() => { return value; }".to_string(),
                    "=> { return value; }".to_string(),
                    "function => { return value; }".to_string(),
                ]),
                correct_answer: "() => { return value; }".to_string(),
                explanation: Some(
                    "Arrow functions use the syntax () => {} where parentheses contain parameters and the arrow leads to the function body."
                        .to_string(),
                ),
            },
            Question {
                id: "2".to_string(),
                kind: QuestionKind::FillBlank,
                prompt: "The _____ operator allows you to extract values from arrays and objects into distinct variables."
                    .to_string(),
                options: None,
                correct_answer: "destructuring".to_string(),
                explanation: Some(
                    "Destructuring assignment allows unpacking values from arrays or properties from objects into distinct variables."
                        .to_string(),
                ),
            },
            Question {
                id: "3".to_string(),
                kind: QuestionKind::SingleSelect,
                prompt: "What is the purpose of the 'let' keyword in ES6?".to_string(),
                options: Some(vec![
                    "It creates global variables only".to_string(),
                    "It creates block-scoped variables".to_string(),
                    "It's identical to 'var'".to_string(),
                    "It creates constants".to_string(),
                ]),
                correct_answer: "It creates block-scoped variables".to_string(),
                explanation: Some(
                    "'let' declares block-scoped variables, unlike 'var' which is function-scoped."
                        .to_string(),
                ),
            },
        ],
    }
}
