/// Case-folded identity of a task name. Two names are the same task iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn from_name(name: &str) -> Self {
        Self(name.to_lowercase())
    }
}
