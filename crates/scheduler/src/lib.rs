mod scheduler;

pub use scheduler::JobScheduleRunner;
