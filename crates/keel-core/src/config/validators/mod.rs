//! Built-in configuration validators, in their declared pipeline order:
//! settings naming, modules, components, search paths, plugins, events,
//! behaviors.

pub mod behaviors;
pub mod components;
pub mod events;
pub mod modules;
pub mod paths;
pub mod plugins;
pub mod settings;

pub use behaviors::BehaviorsValidator;
pub use components::ComponentsValidator;
pub use events::EventsValidator;
pub use modules::ModulesValidator;
pub use paths::SearchPathsValidator;
pub use plugins::PluginsValidator;
pub use settings::SettingsValidator;
