pub mod bingo;
