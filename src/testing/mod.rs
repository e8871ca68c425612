mod fake_registry;

pub use fake_registry::FakeRegistry;
