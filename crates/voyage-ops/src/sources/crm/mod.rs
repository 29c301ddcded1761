//! Salesforce-backed CRM adapter. The travel CRM is built on Salesforce, so
//! traveler and trip batches come from SOQL queries over the REST API and
//! follow-ups are logged back as Task records.

pub(crate) mod client;
pub(crate) mod mapping;

use std::future::Future;

use chrono::Local;
use serde_json::json;
use tracing::debug;

use super::{
    FollowUpEntry, FollowUpLog, FollowUpLogError, SourceError, TravelerSource, TripSource,
};
use crate::config::CrmSettings;
use crate::workflows::health::domain::TripRecord;
use crate::workflows::triage::domain::TravelerRecord;
use client::CrmClient;

/// Object API names in the CRM schema.
pub(crate) mod objects {
    pub const TRAVELER: &str = "Contact";
    pub const TRIP: &str = "Trip__c";
    pub const TASK: &str = "Task";
}

/// Traveler field names in the CRM schema.
pub(crate) mod traveler_fields {
    pub const ID: &str = "Id";
    pub const NAME: &str = "Name";
    pub const EMAIL: &str = "Email";
    pub const PASSPORT_NUMBER: &str = "Passport_Number__c";
    pub const MEDICAL_FORM_STATUS: &str = "Medical_Form_Status__c";
    pub const WAIVER_STATUS: &str = "Waiver_Status__c";
    pub const EMERGENCY_CONTACT: &str = "Emergency_Contact__c";
    pub const DIETARY_REQUIREMENTS: &str = "Dietary_Requirements__c";
    pub const IS_VIP: &str = "VIP__c";
    pub const PREVIOUS_TRIPS: &str = "Previous_Trips__c";
    pub const FOLLOW_UP_COUNT: &str = "Follow_Up_Count__c";
    pub const LAST_CONTACT_DATE: &str = "Last_Contact_Date__c";
    pub const NOTES: &str = "Notes__c";
}

/// Trip field names in the CRM schema.
pub(crate) mod trip_fields {
    pub const ID: &str = "Id";
    pub const NAME: &str = "Name";
    pub const DEPARTURE_DATE: &str = "Departure_Date__c";
    pub const DESTINATION: &str = "Destination__c";
    pub const TOTAL_TRAVELERS: &str = "Total_Travelers__c";
    pub const TYPICAL_COMPLETION: &str = "Typical_Completion_Rate__c";
}

/// Live data provider backed by the CRM REST API.
#[derive(Clone)]
pub struct CrmSource {
    client: CrmClient,
}

impl CrmSource {
    pub fn new(settings: &CrmSettings) -> Result<Self, SourceError> {
        Ok(Self {
            client: CrmClient::new(settings.clone())?,
        })
    }

    async fn fetch_travelers(&self) -> Result<Vec<TravelerRecord>, SourceError> {
        let today = Local::now().date_naive();
        let response = self.client.query(&mapping::travelers_query()).await?;
        Ok(response
            .records
            .iter()
            .map(|record| mapping::map_traveler(record, today).record)
            .collect())
    }

    async fn fetch_trips(&self) -> Result<Vec<TripRecord>, SourceError> {
        let today = Local::now().date_naive();
        let trips = self.client.query(&mapping::trips_query()).await?;
        let travelers = self.client.query(&mapping::travelers_query()).await?;

        let mapped: Vec<mapping::CrmTraveler> = travelers
            .records
            .iter()
            .map(|record| mapping::map_traveler(record, today))
            .collect();

        Ok(trips
            .records
            .iter()
            .map(|record| mapping::map_trip(record, &mapped, today))
            .collect())
    }

    async fn log_follow_up(&self, entry: FollowUpEntry) -> Result<(), SourceError> {
        let today = Local::now().date_naive();
        let subject = match entry.action {
            super::FollowUpAction::Email => {
                let topic = entry
                    .message
                    .as_ref()
                    .map(|message| message.subject.as_str())
                    .unwrap_or("Document Request");
                format!("Email Follow-up: {topic}")
            }
            super::FollowUpAction::Phone => "Phone Follow-up Attempted".to_string(),
            super::FollowUpAction::Skipped => "Follow-up Skipped".to_string(),
        };

        let mut description = entry.notes.clone();
        if let Some(message) = &entry.message {
            description.push_str("\n\n--- Message Content ---\n");
            description.push_str(&message.body);
        }

        let status = if entry.action == super::FollowUpAction::Skipped {
            "Not Started"
        } else {
            "Completed"
        };

        let task_id = self
            .client
            .create_record(
                objects::TASK,
                &json!({
                    "Subject": subject,
                    "Description": description,
                    "WhoId": entry.traveler_id,
                    "ActivityDate": today.to_string(),
                    "Priority": "Normal",
                    "Status": status,
                }),
            )
            .await?;
        debug!(%task_id, traveler = %entry.traveler_id, "follow-up task created");

        // Stamp the contact date so the next classification sees it.
        if entry.action != super::FollowUpAction::Skipped {
            self.client
                .update_record(
                    objects::TRAVELER,
                    &entry.traveler_id,
                    &json!({ traveler_fields::LAST_CONTACT_DATE: today.to_string() }),
                )
                .await?;
        }

        Ok(())
    }
}

impl TravelerSource for CrmSource {
    fn travelers(&self) -> impl Future<Output = Result<Vec<TravelerRecord>, SourceError>> + Send {
        self.fetch_travelers()
    }
}

impl TripSource for CrmSource {
    fn trips(&self) -> impl Future<Output = Result<Vec<TripRecord>, SourceError>> + Send {
        self.fetch_trips()
    }
}

impl FollowUpLog for CrmSource {
    fn record(
        &self,
        entry: FollowUpEntry,
    ) -> impl Future<Output = Result<(), FollowUpLogError>> + Send {
        async move {
            self.log_follow_up(entry)
                .await
                .map_err(|err| FollowUpLogError::Unavailable(err.to_string()))
        }
    }
}
