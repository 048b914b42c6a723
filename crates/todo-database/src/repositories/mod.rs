//! Repository implementations for todo lists and items.

pub mod item;
pub mod todo_list;

pub use item::ItemRepository;
pub use todo_list::TodoListRepository;
