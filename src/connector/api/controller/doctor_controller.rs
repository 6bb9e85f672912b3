use super::super::{Container, ProviderStatus};

pub struct DoctorController<'a> {
    container: &'a Container,
}

impl<'a> DoctorController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn doctor(&self) -> String {
        Self::format_status(self.container.status(), self.container.is_mock())
    }

    fn format_status(status: &ProviderStatus, mock: bool) -> String {
        let mode = if mock { "mock (offline)" } else { "live" };
        let key = if status.completion_key_present {
            "set"
        } else {
            "MISSING (every turn will fail)"
        };
        let search = match (&status.search_provider, &status.search_url) {
            (Some(name), Some(url)) => format!("{name} ({url})"),
            (Some(name), None) => name.clone(),
            _ => "disabled (SERP_API_KEY not set)".to_string(),
        };

        format!(
            "SearchChat Configuration\n========================\nMode:        {}\nModel:       {}\nEndpoint:    {}\nAPI key:     {}\nSearch:      {}",
            mode,
            status.model,
            status.completion_url.as_deref().unwrap_or("-"),
            key,
            search
        )
    }
}
