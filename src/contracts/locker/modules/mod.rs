pub mod locker;
