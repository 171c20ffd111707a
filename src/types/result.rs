use crate::types::itinerary::Itinerary;
use serde::Serialize;
use std::time::Duration;

/// Result of one planning round trip against the agent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutcome {
    /// Validated itinerary decoded from the agent's reply
    pub itinerary: Itinerary,
    /// Text the agent wrote around the JSON payload
    pub commentary: String,
    /// Session the query ran in
    pub session_id: String,
    /// Concatenated reply exactly as streamed
    #[serde(skip)]
    pub raw_reply: String,
    /// Number of streamed text chunks
    pub chunk_count: usize,
    /// Wall time of the upstream call plus parsing
    #[serde(skip)]
    pub elapsed: Duration,
}

impl PlanOutcome {
    /// Human-readable rendering of the plan for terminals.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("=== {} ===", self.itinerary.title));
        lines.push(format!("Session: {}", self.session_id));
        lines.push(format!(
            "Reply: {} chunks in {:.2}s",
            self.chunk_count,
            self.elapsed.as_secs_f64()
        ));
        lines.push(format!(
            "Activities: {} ({} min total)",
            self.itinerary.activities.len(),
            self.itinerary.total_minutes()
        ));
        lines.push(String::new());

        for (idx, activity) in self.itinerary.activities.iter().enumerate() {
            let transport = activity
                .transport_type
                .map(|t| format!(" via {}", t))
                .unwrap_or_default();
            lines.push(format!(
                "{}. [{}] {}{} {} -> {} ({} min)",
                idx + 1,
                activity.activity_type,
                activity.location,
                transport,
                activity.start_time_utc.format("%Y-%m-%d %H:%M"),
                activity.end_time_utc.format("%H:%M"),
                activity.duration
            ));
            for child in &activity.child_activities {
                lines.push(format!("     - {} ({} min)", child.name, child.duration));
            }
            if let Some(note) = &activity.note {
                lines.push(format!("     Note: {}", note));
            }
        }

        let commentary = self.commentary.trim();
        if !commentary.is_empty() {
            lines.push(String::new());
            lines.push("--- Agent Notes ---".to_string());
            lines.push(commentary.to_string());
        }

        lines.join("\n")
    }
}
