use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: String,
    /// The single job this employee is assigned to, if any.
    #[serde(default)]
    pub job_id: Option<i64>,
}

impl Employee {
    pub fn is_assigned_to(&self, job_id: i64) -> bool {
        self.job_id == Some(job_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub skills: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<i64>,
}
