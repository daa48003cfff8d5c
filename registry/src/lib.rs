use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::gateway::StripeGateway;
use adapter::repository::{
    enrollment::EnrollmentRepositoryImpl, event::EventRepositoryImpl,
    health::HealthCheckRepositoryImpl, payment::PaymentRepositoryImpl,
};
use kernel::gateway::payment::PaymentGateway;
use kernel::repository::{
    enrollment::EnrollmentRepository, event::EventRepository, health::HealthCheckRepository,
    payment::PaymentRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    event_repository: Arc<dyn EventRepository>,
    enrollment_repository: Arc<dyn EnrollmentRepository>,
    payment_repository: Arc<dyn PaymentRepository>,
    payment_gateway: Arc<dyn PaymentGateway>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let event_repository = Arc::new(EventRepositoryImpl::new(pool.clone()));
        let enrollment_repository = Arc::new(EnrollmentRepositoryImpl::new(pool.clone()));
        let payment_repository = Arc::new(PaymentRepositoryImpl::new(pool.clone()));
        let payment_gateway = Arc::new(StripeGateway::new(app_config.gateway));
        Self {
            health_check_repository,
            event_repository,
            enrollment_repository,
            payment_repository,
            payment_gateway,
        }
    }

    // テストでリポジトリやゲートウェイを差し替えるためのコンストラクタ
    pub fn from_parts(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        event_repository: Arc<dyn EventRepository>,
        enrollment_repository: Arc<dyn EnrollmentRepository>,
        payment_repository: Arc<dyn PaymentRepository>,
        payment_gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            health_check_repository,
            event_repository,
            enrollment_repository,
            payment_repository,
            payment_gateway,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn enrollment_repository(&self) -> Arc<dyn EnrollmentRepository> {
        self.enrollment_repository.clone()
    }

    pub fn payment_repository(&self) -> Arc<dyn PaymentRepository> {
        self.payment_repository.clone()
    }

    pub fn payment_gateway(&self) -> Arc<dyn PaymentGateway> {
        self.payment_gateway.clone()
    }
}
