use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{PersistenceAdapter, PersistenceError};
use crate::candidates::domain::{Candidate, CandidateId};

const SKILL_DELIMITER: &str = ",";

/// Candidate table kept as a single CSV file.
///
/// Skills share one column, joined with commas. Two shapes do not survive a
/// reload: a skill name containing a comma comes back split in two, and a
/// list holding only an empty skill (`[""]`) comes back as no skills. Every
/// write rewrites the file through a sibling temp file and a rename.
#[derive(Debug)]
pub struct CsvPersistence {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvPersistence {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> Result<Vec<CandidateRow>, PersistenceError> {
        match fs::File::open(&self.path) {
            Ok(file) => parse_rows(file),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_rows(&self, rows: &[CandidateRow]) -> Result<(), PersistenceError> {
        let staging = self.path.with_extension("csv.tmp");
        {
            let file = fs::File::create(&staging)?;
            write_rows(file, rows)?;
        }
        fs::rename(&staging, &self.path)?;
        Ok(())
    }

    fn rewrite<F>(&self, edit: F) -> Result<(), PersistenceError>
    where
        F: FnOnce(&mut Vec<CandidateRow>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| PersistenceError::Unavailable("csv storage lock poisoned".to_string()))?;
        let mut rows = self.read_rows()?;
        edit(&mut rows);
        self.write_rows(&rows)
    }
}

impl PersistenceAdapter for CsvPersistence {
    fn load_all(&self) -> Result<Vec<Candidate>, PersistenceError> {
        Ok(self
            .read_rows()?
            .into_iter()
            .map(CandidateRow::into_candidate)
            .collect())
    }

    fn save(&self, candidate: &Candidate) -> Result<(), PersistenceError> {
        let row = CandidateRow::from_candidate(candidate);
        self.rewrite(|rows| match rows.iter_mut().find(|existing| existing.id == row.id) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        })
    }

    fn remove(&self, id: CandidateId) -> Result<(), PersistenceError> {
        self.rewrite(|rows| rows.retain(|row| row.id != id.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CandidateRow {
    id: u64,
    name: String,
    gpa: f64,
    experience: i64,
    skills: String,
    coding_marks: f64,
}

impl CandidateRow {
    fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.0,
            name: candidate.name.clone(),
            gpa: candidate.gpa,
            experience: candidate.experience,
            skills: encode_skills(&candidate.skills),
            coding_marks: candidate.coding_marks,
        }
    }

    fn into_candidate(self) -> Candidate {
        Candidate {
            id: CandidateId(self.id),
            name: self.name,
            gpa: self.gpa,
            experience: self.experience,
            skills: decode_skills(&self.skills),
            coding_marks: self.coding_marks,
        }
    }
}

fn parse_rows<R: Read>(reader: R) -> Result<Vec<CandidateRow>, PersistenceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<CandidateRow>() {
        rows.push(record?);
    }
    Ok(rows)
}

fn write_rows<W: Write>(writer: W, rows: &[CandidateRow]) -> Result<(), PersistenceError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer.write_record(["id", "name", "gpa", "experience", "skills", "coding_marks"])?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn encode_skills(skills: &[String]) -> String {
    skills.join(SKILL_DELIMITER)
}

fn decode_skills(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(SKILL_DELIMITER).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn skills_share_one_comma_joined_column() {
        let candidate = Candidate::new(1, "Alice", 3.8, 3, ["Python", "SQL"], 80.0);
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &[CandidateRow::from_candidate(&candidate)]).expect("writes");
        let text = String::from_utf8(buffer).expect("utf8");

        assert!(text.starts_with("id,name,gpa,experience,skills,coding_marks\n"));
        assert!(text.contains("1,Alice,3.8,3,\"Python,SQL\","));
    }

    #[test]
    fn comma_inside_a_skill_splits_on_reload() {
        let candidate = Candidate::new(2, "Bob", 3.0, 1, ["C, C++"], 60.0);
        let row = CandidateRow::from_candidate(&candidate);
        assert_eq!(row.into_candidate().skills, vec!["C", " C++"]);
    }

    #[test]
    fn lone_empty_skill_reloads_as_no_skills() {
        let candidate = Candidate::new(3, "Cy", 2.5, 0, [""], 40.0);
        let row = CandidateRow::from_candidate(&candidate);
        assert_eq!(row.skills, "");
        assert!(row.into_candidate().skills.is_empty());
    }

    #[test]
    fn empty_skill_column_loads_as_no_skills() {
        let raw = "id,name,gpa,experience,skills,coding_marks\n4,Cy,2.5,0,,40\n";
        let rows = parse_rows(Cursor::new(raw)).expect("parses");
        let candidate = rows.into_iter().next().expect("one row").into_candidate();
        assert!(candidate.skills.is_empty());
        assert_eq!(candidate.coding_marks, 40.0);
    }

    #[test]
    fn malformed_rows_surface_as_csv_errors() {
        let raw = "id,name,gpa,experience,skills,coding_marks\nnot-a-number,Cy,2.5,0,Go,40\n";
        match parse_rows(Cursor::new(raw)) {
            Err(PersistenceError::Csv(_)) => {}
            other => panic!("expected csv error, got {other:?}"),
        }
    }
}
