fn main() {
    lidar_scanview::cli::run();
}
