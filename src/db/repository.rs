use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::models::{Batch, NewBatchRequest, NewStudentRequest, Student};

#[derive(FromRow)]
struct StudentRow {
    id: String,
    name: String,
    phone_number: String,
    batch_time: String,
    class: String,
    subject: String,
    payment_status: bool,
    payment_amount: f64,
    paid_months: String,
    due_months: String,
    study_days: String,
    batch_id: String,
}

impl TryFrom<StudentRow> for Student {
    type Error = sqlx::Error;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        Ok(Student {
            id: row.id,
            name: row.name,
            phone_number: row.phone_number,
            batch_time: row.batch_time,
            class: row.class,
            subject: row.subject,
            payment_status: row.payment_status,
            payment_amount: row.payment_amount,
            paid_months: decode_list(&row.paid_months)?,
            due_months: decode_list(&row.due_months)?,
            study_days: row.study_days,
            batch_id: row.batch_id,
        })
    }
}

#[derive(FromRow)]
struct BatchRow {
    id: String,
    batch_name: String,
    time: String,
    days: String,
    class: String,
    subject: String,
    total_students: i64,
    payment_amount: f64,
}

impl TryFrom<BatchRow> for Batch {
    type Error = sqlx::Error;

    fn try_from(row: BatchRow) -> Result<Self, Self::Error> {
        Ok(Batch {
            id: row.id,
            batch_name: row.batch_name,
            time: row.time,
            days: decode_list(&row.days)?,
            class: row.class,
            subject: row.subject,
            total_students: row.total_students,
            payment_amount: row.payment_amount,
        })
    }
}

// List columns hold JSON arrays; NULL-ish legacy values read back as empty.
fn decode_list(raw: &str) -> Result<Vec<String>, sqlx::Error> {
    if raw.trim().is_empty() || raw.trim() == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn encode_list(list: &[String]) -> Result<String, sqlx::Error> {
    serde_json::to_string(list).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

/// Store-generated identifier, rendered as 32 hex characters.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

const STUDENT_COLUMNS: &str = r#"
    id, name, phone_number, batch_time, class, subject,
    payment_status, payment_amount, paid_months, due_months,
    study_days, batch_id
"#;

pub async fn fetch_students(db: &SqlitePool) -> Result<Vec<Student>, sqlx::Error> {
    let sql = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY rowid");
    sqlx::query_as::<_, StudentRow>(&sql)
        .fetch_all(db)
        .await?
        .into_iter()
        .map(Student::try_from)
        .collect()
}

pub async fn fetch_student(db: &SqlitePool, id: &str) -> Result<Option<Student>, sqlx::Error> {
    let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1");
    sqlx::query_as::<_, StudentRow>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .map(Student::try_from)
        .transpose()
}

pub async fn insert_student(
    db: &SqlitePool,
    req: NewStudentRequest,
) -> Result<Student, sqlx::Error> {
    let student = Student {
        id: new_id(),
        name: req.name,
        phone_number: req.phone_number,
        batch_time: req.batch_time,
        class: req.class,
        subject: req.subject,
        payment_status: req.payment_status,
        payment_amount: req.payment_amount,
        paid_months: req.paid_months,
        due_months: req.due_months,
        study_days: req.study_days,
        batch_id: req.batch_id,
    };

    sqlx::query(
        r#"
        INSERT INTO students
            (id, name, phone_number, batch_time, class, subject,
            payment_status, payment_amount, paid_months, due_months,
            study_days, batch_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        "#,
    )
    .bind(&student.id)
    .bind(&student.name)
    .bind(&student.phone_number)
    .bind(&student.batch_time)
    .bind(&student.class)
    .bind(&student.subject)
    .bind(student.payment_status)
    .bind(student.payment_amount)
    .bind(encode_list(&student.paid_months)?)
    .bind(encode_list(&student.due_months)?)
    .bind(&student.study_days)
    .bind(&student.batch_id)
    .execute(db)
    .await?;

    Ok(student)
}

/// Writes every mutable field of `student`. Returns false when the id is unknown.
pub async fn save_student(db: &SqlitePool, student: &Student) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE students
        SET name = ?2, phone_number = ?3, batch_time = ?4, class = ?5,
            subject = ?6, payment_status = ?7, payment_amount = ?8,
            paid_months = ?9, due_months = ?10, study_days = ?11, batch_id = ?12
        WHERE id = ?1
        "#,
    )
    .bind(&student.id)
    .bind(&student.name)
    .bind(&student.phone_number)
    .bind(&student.batch_time)
    .bind(&student.class)
    .bind(&student.subject)
    .bind(student.payment_status)
    .bind(student.payment_amount)
    .bind(encode_list(&student.paid_months)?)
    .bind(encode_list(&student.due_months)?)
    .bind(&student.study_days)
    .bind(&student.batch_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Unconditional write of the payment fields; last writer wins.
pub async fn save_payment(db: &SqlitePool, student: &Student) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE students
        SET payment_status = ?2, paid_months = ?3, due_months = ?4
        WHERE id = ?1
        "#,
    )
    .bind(&student.id)
    .bind(student.payment_status)
    .bind(encode_list(&student.paid_months)?)
    .bind(encode_list(&student.due_months)?)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn clear_due_months(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE students SET due_months = '[]' WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_student(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Appends `label` to `due_months` of every unpaid student that has not
/// already got it in either month list.
pub async fn append_due_month_for_unpaid(
    db: &SqlitePool,
    label: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE students
        SET due_months = json_insert(due_months, '$[#]', ?1)
        WHERE payment_status = 0
          AND NOT EXISTS (SELECT 1 FROM json_each(students.due_months) WHERE value = ?1)
          AND NOT EXISTS (SELECT 1 FROM json_each(students.paid_months) WHERE value = ?1)
        "#,
    )
    .bind(label)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}

pub async fn reset_all_payment_status(db: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE students SET payment_status = 0")
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

pub async fn fetch_batches(db: &SqlitePool) -> Result<Vec<Batch>, sqlx::Error> {
    sqlx::query_as::<_, BatchRow>(
        r#"
        SELECT id, batch_name, time, days, class, subject, total_students, payment_amount
        FROM batches
        ORDER BY rowid
        "#,
    )
    .fetch_all(db)
    .await?
    .into_iter()
    .map(Batch::try_from)
    .collect()
}

pub async fn insert_batch(db: &SqlitePool, req: NewBatchRequest) -> Result<Batch, sqlx::Error> {
    let batch = Batch {
        id: new_id(),
        batch_name: req.batch_name,
        time: req.time,
        days: req.days,
        class: req.class,
        subject: req.subject,
        total_students: req.total_students,
        payment_amount: req.payment_amount,
    };

    sqlx::query(
        r#"
        INSERT INTO batches
            (id, batch_name, time, days, class, subject, total_students, payment_amount)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&batch.id)
    .bind(&batch.batch_name)
    .bind(&batch.time)
    .bind(encode_list(&batch.days)?)
    .bind(&batch.class)
    .bind(&batch.subject)
    .bind(batch.total_students)
    .bind(batch.payment_amount)
    .execute(db)
    .await?;

    Ok(batch)
}

pub async fn delete_batch(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM batches WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
