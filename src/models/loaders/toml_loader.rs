use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{AppError, AppResult, FileError};
use crate::models::question::QuizDefinition;

/// 从 TOML 文件加载测验定义，并检查其合法性
pub async fn load_quiz_file(toml_file_path: &Path) -> AppResult<QuizDefinition> {
    let path_display = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_display, e))?;

    let quiz: QuizDefinition =
        toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
            path: path_display,
            source: e,
        })?;

    quiz.validate()?;

    Ok(quiz)
}

/// 从文件夹中加载所有 TOML 测验
///
/// 单个文件解析失败只记录警告，不影响其他文件；结果按文件名排序
pub async fn load_all_quiz_files(folder_path: &str) -> AppResult<Vec<QuizDefinition>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut quizzes = Vec::with_capacity(toml_files.len());
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_quiz_file(&path).await {
            Ok(quiz) => {
                tracing::info!("成功加载测验 [{}]，共 {} 道题", quiz.title, quiz.len());
                quizzes.push(quiz);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(quizzes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionKind;

    fn bundled_quiz_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("quizzes/es6_features.toml")
    }

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("quiz_studio_{}", uuid::Uuid::new_v4().simple()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_bundled_quiz() {
        let quiz = load_quiz_file(&bundled_quiz_path()).await.unwrap();
        assert_eq!(quiz.title, "JavaScript ES6 Features");
        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz.questions[1].kind, QuestionKind::FillBlank);
        assert_eq!(quiz.questions[1].correct_answer, "destructuring");
    }

    #[tokio::test]
    async fn test_missing_folder_is_error() {
        let result = load_all_quiz_files("/definitely/not/here").await;
        assert!(matches!(
            result,
            Err(AppError::File(FileError::DirectoryNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_invalid_files_are_skipped() {
        let dir = scratch_dir();
        std::fs::copy(bundled_quiz_path(), dir.join("a.toml")).unwrap();
        std::fs::write(dir.join("b.toml"), "id = \"x\"\ntitle = \"empty\"\nquestions = []\n").unwrap();
        std::fs::write(dir.join("c.toml"), "not = [valid").unwrap();
        std::fs::write(dir.join("readme.md"), "ignored").unwrap();

        let quizzes = load_all_quiz_files(dir.to_str().unwrap()).await.unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].id, "es6-features");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_parse_error_reports_path() {
        let dir = scratch_dir();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "title = ").unwrap();

        let err = load_quiz_file(&path).await.unwrap_err();
        assert!(err.to_string().contains("broken.toml"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
