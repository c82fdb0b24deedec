// pwcheck state managers

pub mod timer_manager;
