use portfolio_api_rest::RestServerConfig;
use portfolio_config::Config;
use portfolio_core_contact_impl::ContactServiceConfig;
use portfolio_di::provider;
use portfolio_models::contact::SubjectPolicy;
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            RestServerConfig,
            ContactServiceConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        rest_server_config: RestServerConfig,
        contact_service_config: ContactServiceConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let rest_server_config = RestServerConfig {
            host: config.http.host,
            port: config.http.port,
        };

        let contact_service_config = ContactServiceConfig {
            subject_policy: if config.contact.require_subject {
                SubjectPolicy::Required
            } else {
                SubjectPolicy::Optional
            },
            reply_to: config.contact.reply_to.clone().map(Into::into),
        };

        Ok(Self {
            _cache: Default::default(),
            rest_server_config,
            contact_service_config,
        })
    }
}
