//! 单个测验的脚本化答题
//!
//! 演示用的学员：偶数题给出标准答案（故意加上大小写和空白干扰），
//! 奇数题选择第一个错误选项或留下一个错误答案

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::config::Config;
use crate::models::attempt::AttemptRecord;
use crate::models::question::{Question, QuizDefinition};
use crate::session::{QuizResults, QuizSession};

/// 单个测验的运行结果
#[derive(Debug, Clone)]
pub struct QuizOutcome {
    pub results: QuizResults,
    pub attempt: AttemptRecord,
}

/// 演示学员对第 `index` 题（从 0 开始）给出的答案
pub fn scripted_answer(question: &Question, index: usize) -> String {
    if index % 2 == 0 {
        return format!("  {}  ", question.correct_answer.to_uppercase());
    }

    question
        .options()
        .iter()
        .find(|option| !question.is_correct(option))
        .cloned()
        .unwrap_or_else(|| "I don't know".to_string())
}

/// 从头到尾完成一个测验
pub async fn run_quiz(quiz: QuizDefinition, config: &Config) -> Result<QuizOutcome> {
    let quiz_id = quiz.id.clone();
    let mut session = QuizSession::open(quiz, config.tick_interval())
        .with_context(|| format!("无法打开测验: {}", quiz_id))?;

    log_quiz_start(&session);

    // 先跳到最后一题再跳回，模拟使用题目导航条
    let last = session.quiz().len() - 1;
    session.jump_to(last);
    session.jump_to(0);

    while !session.is_results_shown() {
        let index = session.current_index();
        let answer = scripted_answer(session.current_question(), index);
        session.select_answer(answer);

        if !session.can_advance() {
            bail!(
                "[测验 {}] 第 {} 题的答案为空，无法继续",
                session.quiz().id,
                index + 1
            );
        }
        session.go_to_next();
        tokio::task::yield_now().await;
    }

    let results = session
        .results()
        .context("答题结束后应当进入结果页")?;
    let attempt = session
        .attempt_record()
        .context("答题结束后应当生成完成记录")?;

    log_quiz_complete(&results);
    session.close();

    Ok(QuizOutcome { results, attempt })
}

// ========== 日志辅助函数 ==========

fn log_quiz_start(session: &QuizSession) {
    let quiz = session.quiz();
    info!("\n{}", "─".repeat(60));
    info!("📝 测验: {} (共 {} 题)", quiz.title, quiz.len());
    if !quiz.description.is_empty() {
        info!("   {}", quiz.description);
    }
    info!("{}", "─".repeat(60));
}

fn log_quiz_complete(results: &QuizResults) {
    info!(
        "[测验 {}] 📊 {} 得分 {}% | 正确 {} | 错误 {} | 用时 {}",
        results.quiz_id,
        results.verdict(),
        results.score,
        results.correct,
        results.incorrect,
        results.formatted_time()
    );
    for review in results.reviews.iter().filter(|r| !r.is_correct) {
        info!(
            "[测验 {}]   ✗ 题目 {}: 正确答案 {}",
            results.quiz_id, review.question_id, review.correct_answer
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample::sample_quiz;

    #[test]
    fn test_scripted_answers() {
        let quiz = sample_quiz();
        let first = scripted_answer(&quiz.questions[0], 0);
        assert!(quiz.questions[0].is_correct(&first));

        let second = scripted_answer(&quiz.questions[1], 1);
        assert!(!quiz.questions[1].is_correct(&second));

        let third = scripted_answer(&quiz.questions[2], 1);
        assert_eq!(third, "It creates global variables only");
    }

    #[tokio::test]
    async fn test_run_quiz_reaches_results() {
        let outcome = run_quiz(sample_quiz(), &Config::default()).await.unwrap();
        // 第 1、3 题正确，第 2 题错误
        assert_eq!(outcome.results.correct, 2);
        assert_eq!(outcome.results.score, 67);
        assert_eq!(outcome.attempt.score, 67);
    }

    #[tokio::test]
    async fn test_run_quiz_stops_on_blank_answer() {
        use crate::models::question::QuestionKind;

        // 第 2 题唯一的错误选项是空白，演示学员无法前进
        let mut quiz = sample_quiz();
        quiz.questions[1] = Question {
            id: "2".to_string(),
            kind: QuestionKind::SingleSelect,
            prompt: "Pick one".to_string(),
            options: Some(vec!["   ".to_string(), "Rome".to_string()]),
            correct_answer: "Rome".to_string(),
            explanation: None,
        };

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            run_quiz(quiz, &Config::default()),
        )
        .await
        .expect("run_quiz should not hang");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("第 2 题"));
    }

    #[tokio::test]
    async fn test_run_quiz_rejects_blank_correct_answer() {
        let mut quiz = sample_quiz();
        quiz.questions[0].correct_answer = String::new();

        let err = run_quiz(quiz, &Config::default()).await.unwrap_err();
        assert!(format!("{:#}", err).contains("标准答案为空"));
    }
}
