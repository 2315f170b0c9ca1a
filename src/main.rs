fn main() {
    mee6_scrape::main();
}
