//! Offering records stored on local disk.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use grade_compare::parser::{parse_offerings_csv, parse_offerings_json};
use grade_compare::records::OfferingRecord;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::services::sources::OfferingSource;

/// Reads offerings from a `.json` array or a `.csv` export holding any
/// number of courses.
pub struct FileOfferingSource {
    path: PathBuf,
}

impl FileOfferingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_all(&self) -> Result<Vec<OfferingRecord>> {
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let display = self.path.display();

        match extension.as_deref() {
            Some("json") => {
                let bytes =
                    std::fs::read(&self.path).with_context(|| format!("reading {display}"))?;
                parse_offerings_json(&bytes).with_context(|| format!("parsing {display}"))
            }
            Some("csv") => {
                let file = std::fs::File::open(&self.path)
                    .with_context(|| format!("opening {display}"))?;
                parse_offerings_csv(file).with_context(|| format!("parsing {display}"))
            }
            _ => bail!("{display}: expected a .json or .csv file"),
        }
    }
}

#[async_trait]
impl OfferingSource for FileOfferingSource {
    async fn offerings(&self, course_code: &str) -> Result<Vec<OfferingRecord>> {
        let records: Vec<OfferingRecord> = self
            .load_all()?
            .into_iter()
            .filter(|r| r.course_code == course_code)
            .collect();
        debug!(
            path = %self.path.display(),
            course_code,
            count = records.len(),
            "Loaded offerings from file"
        );
        Ok(records)
    }
}

/// Whether `source` names a local file rather than a URL.
pub fn is_local(source: &str) -> bool {
    !source.starts_with("http://")
        && !source.starts_with("https://")
        && Path::new(source).extension().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[tokio::test]
    async fn test_json_file_filters_by_course() {
        let path = temp_path("grade_compare_test_offerings.json");
        fs::write(
            &path,
            r#"[
                {"course_code":"CS 101","term":"Fall 2023","instructor":"Smith","grades":{"A":1}},
                {"course_code":"MATH 2","term":"Fall 2023","instructor":"Lee","grades":{"B":1}}
            ]"#,
        )
        .unwrap();

        let source = FileOfferingSource::new(&path);
        let records = source.offerings("CS 101").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].instructor, "Smith");
        assert!(source.offerings("PHYS 7").await.unwrap().is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_csv_file() {
        let path = temp_path("grade_compare_test_offerings.csv");
        fs::write(
            &path,
            "course_code,term,instructor,A,B\nCS 101,Fall 2023,Smith,4,2\n",
        )
        .unwrap();

        let records = FileOfferingSource::new(&path).offerings("CS 101").await.unwrap();
        assert_eq!(records[0].grades.get("A"), Some(&4));

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let source = FileOfferingSource::new("offerings.xml");
        assert!(source.offerings("CS 101").await.is_err());
    }

    #[test]
    fn test_is_local() {
        assert!(is_local("data/offerings.json"));
        assert!(!is_local("https://grades.example.edu/api"));
        assert!(!is_local("http://localhost:8080"));
    }
}
