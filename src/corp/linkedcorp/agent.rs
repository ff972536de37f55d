use serde::{Deserialize, Serialize};

use crate::action::{decode_json, Action};

/// Visible scope of the current application
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResultAgentPermList {
    /// Members in `corpid/userid` form
    #[serde(default)]
    pub userids: Vec<String>,
    /// Departments in `linkedid/departmentid` form
    #[serde(default)]
    pub department_ids: Vec<String>,
}

/// Get the application's visible scope across linked corporations
///
/// POST /cgi-bin/linkedcorp/agent/get_perm_list?access_token=ACCESS_TOKEN
pub fn list_agent_perm() -> Action<ResultAgentPermList> {
    Action::post(
        "/cgi-bin/linkedcorp/agent/get_perm_list",
        decode_json::<ResultAgentPermList>,
    )
}
