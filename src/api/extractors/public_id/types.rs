/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - 新しいリソースを足すときはここにタグと alias を追加する
 */
use super::core::{PublicId, PublicResource};

// courses
pub enum CourseTag {}

impl PublicResource for CourseTag {
    const NAME: &'static str = "Course";
}

pub type PublicCourseId = PublicId<CourseTag>;
