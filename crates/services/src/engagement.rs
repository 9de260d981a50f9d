//! Comments and likes on cases.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::{AppError, CaseRepo, Comment, CommentRepo, Like, LikeRepo, Result};

pub const NICKNAME_MAX_CHARS: usize = 50;
pub const COMMENT_MAX_CHARS: usize = 1000;

/// Like state of a case as seen by one requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeStatus {
    pub liked: bool,
    pub total_likes: i64,
}

pub struct EngagementService {
    cases: Arc<dyn CaseRepo>,
    comments: Arc<dyn CommentRepo>,
    likes: Arc<dyn LikeRepo>,
}

impl EngagementService {
    pub fn new(
        cases: Arc<dyn CaseRepo>,
        comments: Arc<dyn CommentRepo>,
        likes: Arc<dyn LikeRepo>,
    ) -> Self {
        Self {
            cases,
            comments,
            likes,
        }
    }

    pub async fn add_comment(
        &self,
        case_id: Uuid,
        nickname: &str,
        content: &str,
    ) -> Result<Comment> {
        let nickname = validate_nickname(nickname)?;
        let content = validate_comment(content)?;

        self.ensure_case(case_id).await?;

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::now_v7(),
            case_id,
            nickname,
            content,
            created_at: now,
            updated_at: now,
        };
        self.comments.insert(&comment).await?;
        Ok(comment)
    }

    pub async fn edit_comment(
        &self,
        case_id: Uuid,
        comment_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        let content = validate_comment(content)?;
        self.comments
            .update_content(case_id, comment_id, &content)
            .await?
            .ok_or_else(|| AppError::NotFound("comment", comment_id.to_string()))
    }

    pub async fn remove_comment(&self, case_id: Uuid, comment_id: Uuid) -> Result<()> {
        if !self.comments.delete(case_id, comment_id).await? {
            return Err(AppError::NotFound("comment", comment_id.to_string()));
        }
        Ok(())
    }

    /// Comments for a case, newest first.
    pub async fn comments_for(&self, case_id: Uuid) -> Result<Vec<Comment>> {
        self.comments.list_for_case(case_id).await
    }

    /// Flips the requester's like on a case and returns the new state.
    ///
    /// Delete-first keeps the toggle race-safe: two concurrent requests
    /// resolve through the unique (case, IP) index instead of a
    /// check-then-act window.
    pub async fn toggle_like(&self, case_id: Uuid, ip_address: &str) -> Result<bool> {
        self.ensure_case(case_id).await?;

        if self.likes.remove(case_id, ip_address).await? {
            return Ok(false);
        }

        let like = Like {
            id: Uuid::now_v7(),
            case_id,
            ip_address: ip_address.to_string(),
            created_at: Utc::now(),
        };
        // A lost race means the pair exists either way.
        self.likes.insert(&like).await?;
        Ok(true)
    }

    pub async fn like_status(&self, case_id: Uuid, ip_address: &str) -> Result<LikeStatus> {
        let liked = self.likes.exists(case_id, ip_address).await?;
        let total_likes = self.likes.count_for_case(case_id).await?;
        Ok(LikeStatus { liked, total_likes })
    }

    pub async fn comment_count(&self) -> Result<i64> {
        self.comments.count().await
    }

    pub async fn like_count(&self) -> Result<i64> {
        self.likes.count().await
    }

    async fn ensure_case(&self, case_id: Uuid) -> Result<()> {
        self.cases
            .find_by_id(case_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("case", case_id.to_string()))
    }
}

fn validate_nickname(nickname: &str) -> Result<String> {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(AppError::Validation("nickname is required".to_string()));
    }
    if nickname.chars().count() > NICKNAME_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "nickname must not exceed {NICKNAME_MAX_CHARS} characters"
        )));
    }
    Ok(nickname.to_string())
}

fn validate_comment(content: &str) -> Result<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::Validation(
            "comment content is required".to_string(),
        ));
    }
    if content.chars().count() > COMMENT_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "comment must not exceed {COMMENT_MAX_CHARS} characters"
        )));
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::{Case, Category, MockCaseRepo, MockCommentRepo, MockLikeRepo};

    fn existing_case(id: Uuid) -> Case {
        Case {
            id,
            title: "Fake prosecutor call".to_string(),
            slug: "voice-phishing-fake-prosecutor-call-case".to_string(),
            category: Category::VoicePhishing,
            amount: None,
            content: "x".repeat(30),
            region: None,
            tip: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service_with(
        cases: MockCaseRepo,
        comments: MockCommentRepo,
        likes: MockLikeRepo,
    ) -> EngagementService {
        EngagementService::new(Arc::new(cases), Arc::new(comments), Arc::new(likes))
    }

    #[tokio::test]
    async fn comment_on_missing_case_is_not_found() {
        let mut cases = MockCaseRepo::new();
        cases.expect_find_by_id().returning(|_| Ok(None));

        let service = service_with(cases, MockCommentRepo::new(), MockLikeRepo::new());
        let result = service
            .add_comment(Uuid::now_v7(), "reader", "stay safe out there")
            .await;
        assert!(matches!(result, Err(AppError::NotFound("case", _))));
    }

    #[tokio::test]
    async fn blank_nickname_is_rejected_before_any_lookup() {
        let service = service_with(
            MockCaseRepo::new(),
            MockCommentRepo::new(),
            MockLikeRepo::new(),
        );
        let result = service
            .add_comment(Uuid::now_v7(), "   ", "stay safe out there")
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn toggle_removes_an_existing_like() {
        let case_id = Uuid::now_v7();
        let mut cases = MockCaseRepo::new();
        cases
            .expect_find_by_id()
            .returning(move |id| Ok(Some(existing_case(id))));
        let mut likes = MockLikeRepo::new();
        likes.expect_remove().returning(|_, _| Ok(true));

        let service = service_with(cases, MockCommentRepo::new(), likes);
        let liked = service.toggle_like(case_id, "10.0.0.1").await.unwrap();
        assert!(!liked);
    }

    #[tokio::test]
    async fn toggle_inserts_when_nothing_to_remove() {
        let case_id = Uuid::now_v7();
        let mut cases = MockCaseRepo::new();
        cases
            .expect_find_by_id()
            .returning(move |id| Ok(Some(existing_case(id))));
        let mut likes = MockLikeRepo::new();
        likes.expect_remove().returning(|_, _| Ok(false));
        likes.expect_insert().returning(|_| Ok(true));

        let service = service_with(cases, MockCommentRepo::new(), likes);
        let liked = service.toggle_like(case_id, "10.0.0.1").await.unwrap();
        assert!(liked);
    }

    #[tokio::test]
    async fn like_status_reflects_requester_ip() {
        let mut likes = MockLikeRepo::new();
        likes
            .expect_exists()
            .withf(|_, ip| ip == "10.0.0.1")
            .returning(|_, _| Ok(true));
        likes.expect_count_for_case().returning(|_| Ok(4));

        let service = service_with(MockCaseRepo::new(), MockCommentRepo::new(), likes);
        let status = service
            .like_status(Uuid::now_v7(), "10.0.0.1")
            .await
            .unwrap();
        assert_eq!(
            status,
            LikeStatus {
                liked: true,
                total_likes: 4
            }
        );
    }
}
