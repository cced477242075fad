//! The `lexdrill init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("lexdrill.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("bank")?;
    write_if_missing(Path::new("bank/manifest.json"), SAMPLE_MANIFEST)?;
    write_if_missing(Path::new("bank/sample.json"), SAMPLE_BANK)?;

    println!("\nNext steps:");
    println!("  1. Add bank files to bank/ and list them in bank/manifest.json");
    println!("  2. Run: lexdrill validate");
    println!("  3. Run: lexdrill practice --subject 1301");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lexdrill configuration

bank_dir = "bank"
stats_path = "lexdrill-stats.json"

[sampling]
subject_size = 10
mock_size = 15
# "strict": a category without subject codes yields no questions.
# "full_bank": such a category draws from the whole bank.
empty_category = "strict"

[[categories]]
id = "session-1"
name = "綜合法學(一)：公法、國際法"
subjects = ["2301"]

[[categories]]
id = "session-2"
name = "綜合法學(一)：刑法、刑訴、倫理"
subjects = ["1301"]

[[categories]]
id = "session-3"
name = "綜合法學(二)：民法、民訴"
subjects = ["3301"]

[[categories]]
id = "session-4"
name = "綜合法學(二)：商法、執行法、法英"
subjects = ["4301"]
"#;

const SAMPLE_MANIFEST: &str = r#"{
  "files": ["sample.json"]
}
"#;

const SAMPLE_BANK: &str = r#"[
  {
    "question_id": "108-1301-001",
    "year": 108,
    "subject_code": "1301",
    "question_no": 1,
    "stem": "Which principle forbids punishing an act that was not an offence when it was committed?",
    "choices": [
      {"choice_id": "c1", "text": "Proportionality"},
      {"choice_id": "c2", "text": "Nullum crimen sine lege"},
      {"choice_id": "c3", "text": "Double jeopardy"},
      {"choice_id": "c4", "text": "Presumption of innocence"}
    ],
    "correct_choice_ids": ["c2"],
    "explanation": "Only conduct defined as an offence by law at the time it was committed can be punished.",
    "tags": ["Criminal Code Art. 1"]
  },
  {
    "question_id": "108-2301-001",
    "year": 108,
    "subject_code": "2301",
    "question_no": 1,
    "stem": "Which body interprets the constitution with binding effect?",
    "choices": [
      {"choice_id": "c1", "text": "The legislature"},
      {"choice_id": "c2", "text": "The cabinet"},
      {"choice_id": "c3", "text": "The constitutional court"},
      {"choice_id": "c4", "text": "The supreme administrative court"}
    ],
    "correct_choice_ids": ["c3"]
  },
  {
    "id": "108-3301-001",
    "year": "108",
    "subject_code": " 3301 ",
    "question_no": "1",
    "content": "A contract concluded by a minor without consent of the legal representative is:",
    "presented_choices": [
      {"id": "c1", "content": "Void"},
      {"id": "c2", "content": "Valid"},
      {"id": "c3", "content": "Pending ratification"}
    ],
    "correct_choice_ids": ["c3"],
    "explanation": "Its effect depends on ratification by the legal representative."
  },
  {
    "question_id": "108-4301-001",
    "year": 108,
    "subject_code": "4301",
    "question_no": 1,
    "stem": "Who bears liability for the debts of a company limited by shares?",
    "choices": [
      {"choice_id": "c1", "text": "The company itself"},
      {"choice_id": "c2", "text": "Each shareholder without limit"},
      {"choice_id": "c3", "text": "The directors personally"}
    ],
    "correct_choice_ids": ["c1"]
  }
]
"#;
